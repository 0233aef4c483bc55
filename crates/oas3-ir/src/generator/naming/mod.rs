pub mod identifiers;
pub mod patch_table;

#[cfg(test)]
mod tests;
