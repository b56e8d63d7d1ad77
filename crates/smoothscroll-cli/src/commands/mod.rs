pub mod css;
pub mod edit;
pub mod replay;
pub mod settings;
