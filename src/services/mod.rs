pub mod google;
pub mod locale_files;
pub mod pipeline;
pub mod placeholder;
pub mod qa;
pub mod translate_types;
pub mod tree;
