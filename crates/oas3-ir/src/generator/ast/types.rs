use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

const MODELS_QUALIFIER: &str = "models::";

/// Concrete target types the resolver can produce without a model reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum RustPrimitive {
  #[strum(serialize = "i8")]
  I8,
  #[strum(serialize = "i16")]
  I16,
  #[strum(serialize = "i32")]
  I32,
  #[strum(serialize = "i64")]
  I64,
  #[strum(serialize = "isize")]
  Isize,
  #[strum(serialize = "u8")]
  U8,
  #[strum(serialize = "u16")]
  U16,
  #[strum(serialize = "u32")]
  U32,
  #[strum(serialize = "u64")]
  U64,
  #[strum(serialize = "usize")]
  Usize,
  #[strum(serialize = "f32")]
  F32,
  #[strum(serialize = "f64")]
  F64,
  #[strum(serialize = "bool")]
  Bool,
  #[strum(serialize = "String")]
  String,
  #[strum(serialize = "Vec<u8>")]
  Bytes,
  #[strum(serialize = "DateTime<Utc>")]
  DateTime,
  #[strum(serialize = "uuid::Uuid")]
  Uuid,
  #[strum(serialize = "Value")]
  Value,
}

impl RustPrimitive {
  pub fn is_integer(self) -> bool {
    matches!(
      self,
      Self::I8
        | Self::I16
        | Self::I32
        | Self::I64
        | Self::Isize
        | Self::U8
        | Self::U16
        | Self::U32
        | Self::U64
        | Self::Usize
    )
  }

  pub fn is_float(self) -> bool {
    matches!(self, Self::F32 | Self::F64)
  }

  /// Scalars a renderer may format directly (`number`, `integer`, `string`).
  pub fn is_displayable(self) -> bool {
    self.is_integer() || self.is_float() || self == Self::String
  }

  pub fn unsigned(bits: u32) -> Self {
    match bits {
      0..=8 => Self::U8,
      9..=16 => Self::U16,
      17..=32 => Self::U32,
      _ => Self::U64,
    }
  }

  pub fn signed(bits: u32) -> Self {
    match bits {
      0..=8 => Self::I8,
      9..=16 => Self::I16,
      17..=32 => Self::I32,
      _ => Self::I64,
    }
  }
}

/// Resolved type of a property, parameter, response or alias model.
///
/// Container types keep their element in `inner` and model references keep
/// the canonical key of the model in `reference`, so names can be rebuilt
/// after the registry renames a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct TypeDescriptor {
  pub name: String,
  pub is_container: bool,
  pub is_map: bool,
  pub is_primitive: bool,
  pub is_displayable: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub format: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reference: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub inner: Option<Box<TypeDescriptor>>,
  /// Set on placeholder element types invented for arrays without `items`.
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub synthesized: bool,
}

impl TypeDescriptor {
  pub fn primitive(primitive: RustPrimitive) -> Self {
    Self {
      name: primitive.to_string(),
      is_container: false,
      is_map: false,
      is_primitive: primitive != RustPrimitive::Value,
      is_displayable: primitive.is_displayable(),
      format: None,
      reference: None,
      inner: None,
      synthesized: false,
    }
  }

  /// The open-ended fallback used for `{}` payloads and unclassifiable shapes.
  pub fn dynamic() -> Self {
    Self::primitive(RustPrimitive::Value)
  }

  pub fn model(canonical_key: impl Into<String>, class_name: impl Into<String>) -> Self {
    Self {
      name: class_name.into(),
      is_container: false,
      is_map: false,
      is_primitive: false,
      is_displayable: false,
      format: None,
      reference: Some(canonical_key.into()),
      inner: None,
      synthesized: false,
    }
  }

  pub fn vec_of(inner: TypeDescriptor) -> Self {
    Self {
      name: format!("Vec<{}>", inner.name),
      is_container: true,
      is_map: false,
      is_primitive: false,
      is_displayable: false,
      format: None,
      reference: None,
      inner: Some(Box::new(inner)),
      synthesized: false,
    }
  }

  pub fn map_of(inner: TypeDescriptor) -> Self {
    Self {
      name: format!("HashMap<String, {}>", inner.name),
      is_container: true,
      is_map: true,
      is_primitive: false,
      is_displayable: false,
      format: None,
      reference: None,
      inner: Some(Box::new(inner)),
      synthesized: false,
    }
  }

  pub fn with_format(mut self, format: Option<&str>) -> Self {
    self.format = format.map(String::from);
    self
  }

  pub fn synthesized(mut self) -> Self {
    self.synthesized = true;
    self
  }

  pub fn is_list(&self) -> bool {
    self.is_container && !self.is_map
  }

  pub fn is_dynamic(&self) -> bool {
    self.name == RustPrimitive::Value.to_string()
  }

  pub fn as_primitive(&self) -> Option<RustPrimitive> {
    if self.reference.is_some() || self.is_container {
      return None;
    }
    self.name.parse().ok()
  }

  /// Name used for "same type" comparisons.
  pub fn canonical_name(&self) -> String {
    let compact: String = self.name.chars().filter(|c| !c.is_whitespace()).collect();
    compact.replace(MODELS_QUALIFIER, "")
  }

  pub fn same_type(&self, other: &TypeDescriptor) -> bool {
    self.canonical_name() == other.canonical_name()
  }

  /// Iterates this descriptor and every nested element type.
  pub fn walk(&self) -> impl Iterator<Item = &TypeDescriptor> {
    std::iter::successors(Some(self), |t| t.inner.as_deref())
  }

  /// Rebuilds names from the current model class names.
  ///
  /// `lookup` maps a canonical key to its class name, or `None` when the
  /// model no longer exists. A dangling reference degrades to the dynamic
  /// type and its key is returned.
  pub fn relabel<F>(&mut self, lookup: &F) -> Option<String>
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(inner) = self.inner.as_deref_mut() {
      let dangling = inner.relabel(lookup);
      self.name = if self.is_map {
        format!("HashMap<String, {}>", inner.name)
      } else {
        format!("Vec<{}>", inner.name)
      };
      return dangling;
    }

    let key = self.reference.clone()?;
    match lookup(&key) {
      Some(class_name) => {
        self.name = class_name;
        None
      }
      None => {
        *self = Self::dynamic();
        Some(key)
      }
    }
  }
}

impl From<RustPrimitive> for TypeDescriptor {
  fn from(primitive: RustPrimitive) -> Self {
    Self::primitive(primitive)
  }
}
