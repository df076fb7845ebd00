pub mod info;
pub mod pack;
pub mod unpack;
