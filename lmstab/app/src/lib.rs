pub mod replay;
pub mod trace;
