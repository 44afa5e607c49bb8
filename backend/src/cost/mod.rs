pub mod arithmetic;
pub mod insert;
pub mod lifecycle;
pub mod model;
pub mod period;
pub mod repository;
pub mod repository_sqlx;
pub mod shed_lock;
pub mod update;
