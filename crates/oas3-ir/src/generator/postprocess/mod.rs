pub(crate) mod name_patch;
pub(crate) mod vendor_flags;
