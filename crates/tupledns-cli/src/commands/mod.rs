pub mod decode;
pub mod encode;
pub mod find;
pub mod find_range;
pub mod matches;
pub mod register;
pub mod unregister;
pub mod validate;
