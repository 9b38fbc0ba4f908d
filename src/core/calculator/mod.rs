pub mod earnings;
pub mod periods;
