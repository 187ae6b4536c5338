pub mod collision;
pub mod planning;
pub mod pursuit;
