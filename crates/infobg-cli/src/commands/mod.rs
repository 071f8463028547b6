pub mod catalog;
pub mod census;
pub mod dispatch;
pub mod infostat;
pub mod institutions;
pub mod names;
pub mod resolve;
