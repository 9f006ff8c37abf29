//! HBnB 前端的会话检查与通知轮询
//!
//! 客户端的角色判断只用于界面提示，所有授权都必须由服务端在每个受保护请求上重新校验。

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use config::Config;
pub use error::{AppError, MalformedSessionError, Result};
pub use state::PageContext;
