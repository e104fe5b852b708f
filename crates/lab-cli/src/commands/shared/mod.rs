pub mod paging;
pub mod parse;
pub mod wizard;
