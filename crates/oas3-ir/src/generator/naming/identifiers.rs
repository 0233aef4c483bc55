use std::{
  collections::{BTreeSet, HashSet},
  sync::LazyLock,
};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

/// Prefix used to escape model names that are not usable as type names.
pub const MODEL_PREFIX: &str = "Model";
pub const UNNAMED_MODEL: &str = "UnnamedModel";
pub const EMPTY_VARIANT: &str = "EMPTY";
const RESERVED_CALL_PREFIX: &str = "call_";

pub(crate) static FORBIDDEN_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "gen", "self",
  ]
  .into_iter()
  .collect()
});

/// Type names the generated code imports or derives, so models cannot take them.
static RESERVED_PASCAL_CASE: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "Box", "Clone", "Copy", "DateTime", "Display", "HashMap", "Option", "Result", "Self", "Send", "String", "Sync",
    "Type", "Utc", "Value", "Vec",
  ]
  .into_iter()
  .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static OPERATION_NAMESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+/").unwrap());

/// Transliterates to ASCII, replaces invalid characters with underscores,
/// collapses runs of underscores and trims them from both ends.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// `PascalCase` without any escaping.
///
/// Input without separators keeps its inner capitalization (`createWidget` ->
/// `CreateWidget`, `XMLParser` stays). Separated words are capitalized, and
/// all-caps words are normalized (`NOT_FORCED` -> `NotForced`).
pub fn camelize(input: &str) -> String {
  let sanitized = sanitize(input);
  let has_separators = sanitized.contains('_');

  sanitized
    .split('_')
    .filter(|word| !word.is_empty())
    .map(|word| {
      let all_upper = !word.chars().any(|c| c.is_ascii_lowercase());
      let mut chars = word.chars();
      let Some(first) = chars.next() else {
        return String::new();
      };
      let rest = chars.as_str();
      if has_separators && all_upper {
        format!("{}{}", first.to_ascii_uppercase(), rest.to_ascii_lowercase())
      } else {
        format!("{}{rest}", first.to_ascii_uppercase())
      }
    })
    .collect()
}

/// Why [`model_name`] had to escape a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameAdjustment {
  Reserved,
  DigitLeading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName {
  pub class_name: String,
  pub adjustment: Option<NameAdjustment>,
}

/// Converts any string into a usable model class name.
///
/// Never fails: reserved identifiers (compared case-insensitively for
/// keywords) and digit-leading names get the `Model` prefix, and input that
/// sanitizes to nothing becomes `UnnamedModel`.
pub fn model_name(input: &str) -> ModelName {
  let class_name = camelize(input);

  if class_name.is_empty() {
    return ModelName {
      class_name: UNNAMED_MODEL.to_string(),
      adjustment: None,
    };
  }

  let adjustment = if is_reserved_type_name(&class_name) {
    Some(NameAdjustment::Reserved)
  } else if starts_with_digit(&class_name) {
    Some(NameAdjustment::DigitLeading)
  } else {
    None
  };

  let class_name = match adjustment {
    Some(_) => format!("{MODEL_PREFIX}{class_name}"),
    None => class_name,
  };

  ModelName { class_name, adjustment }
}

pub fn to_model_name(input: &str) -> String {
  model_name(input).class_name
}

pub fn is_reserved_type_name(name: &str) -> bool {
  RESERVED_PASCAL_CASE.contains(name) || FORBIDDEN_IDENTIFIERS.contains(name.to_ascii_lowercase().as_str())
}

/// Ensures a name is unique within a set of used names, appending a numeric suffix if needed.
pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  ensure_unique_by(base_name, |candidate| used_names.contains(candidate))
}

pub(crate) fn ensure_unique_by<F>(base_name: &str, is_taken: F) -> String
where
  F: Fn(&str) -> bool,
{
  if !is_taken(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}{i}");
    if !is_taken(&new_name) {
      return new_name;
    }
    i += 1;
  }
}

/// Converts a string into a field or parameter name (`snake_case`).
///
/// # Rules:
/// 1. `ref` becomes `git_ref` and `self` becomes `self_`.
/// 2. Other keywords get a raw identifier prefix (`r#`).
/// 3. Digit-leading names are prefixed with `_`.
/// 4. Empty input becomes `_`.
pub fn to_var_name(name: &str) -> String {
  let mut ident = sanitize(name).to_snake_case();

  if ident.is_empty() {
    return "_".to_string();
  }

  match ident.as_str() {
    "ref" => return "git_ref".to_string(),
    "self" => return "self_".to_string(),
    kw if FORBIDDEN_IDENTIFIERS.contains(kw) => return format!("r#{ident}"),
    _ => {}
  }

  if starts_with_digit(&ident) {
    ident.insert(0, '_');
  }
  ident
}

/// Constant-case variant name for an enum value. Empty values map to `EMPTY`.
pub fn to_enum_var_name(value: &str) -> String {
  let sanitized = sanitize(value);
  if sanitized.is_empty() {
    return EMPTY_VARIANT.to_string();
  }

  let mut ident = sanitized.to_constant_case();
  if starts_with_digit(&ident) {
    ident.insert(0, '_');
  }
  ident
}

/// Strips a leading `namespace/` segment from an operation id.
pub fn strip_operation_namespace(operation_id: &str) -> &str {
  match OPERATION_NAMESPACE_RE.find(operation_id) {
    Some(found) => &operation_id[found.end()..],
    None => operation_id,
  }
}

/// Method name for an operation. Keywords get a `call_` prefix.
pub fn to_operation_nickname(operation_id: &str) -> String {
  let mut nickname = sanitize(operation_id).to_snake_case();
  if nickname.is_empty() {
    return "call".to_string();
  }
  if FORBIDDEN_IDENTIFIERS.contains(nickname.as_str()) {
    nickname.insert_str(0, RESERVED_CALL_PREFIX);
  } else if starts_with_digit(&nickname) {
    nickname.insert(0, '_');
  }
  nickname
}

/// Operation id synthesized from method and path when the document has none.
pub fn synthesize_operation_id(method: &str, path: &str) -> String {
  let words: Vec<String> = std::iter::once(method.to_ascii_lowercase())
    .chain(
      path
        .split('/')
        .map(|segment| segment.trim_start_matches('{').trim_end_matches('}'))
        .filter(|segment| !segment.is_empty())
        .map(camelize),
    )
    .collect();
  words.concat()
}

fn starts_with_digit(s: &str) -> bool {
  s.starts_with(|c: char| c.is_ascii_digit())
}
