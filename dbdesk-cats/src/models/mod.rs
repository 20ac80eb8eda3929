/// Document models
pub mod cat;
