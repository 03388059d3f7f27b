//! 数据模型模块

pub mod auth;
pub mod subject;

pub use subject::{Credential, NewSubject, SubjectId, SubjectRecord};
