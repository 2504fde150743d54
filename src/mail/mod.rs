pub mod decoders;
pub mod summary;
