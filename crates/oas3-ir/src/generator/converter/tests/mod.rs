mod operations;
mod type_resolution;
