use serde::{Deserialize, Serialize};

/// 一户的完整记录，`password` 为加密后的密文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Flat {
    pub flat_no: i32,
    pub owner_name: String,
    pub owner_surname: String,
    pub mail: Option<String>,
    pub password: String,
    pub dues_count: i32,
}

impl Flat {
    /// 新建的空户，没有业主信息
    pub fn new(flat_no: i32) -> Self {
        Self {
            flat_no,
            owner_name: String::new(),
            owner_surname: String::new(),
            mail: None,
            password: String::new(),
            dues_count: 0,
        }
    }
}

/// 设置业主时提交的字段，`password` 为明文
#[derive(Debug, Clone, PartialEq)]
pub struct FlatOwner {
    pub flat_no: i32,
    pub owner_name: String,
    pub owner_surname: String,
    pub mail: String,
    pub password: String,
    pub dues_count: Option<i32>,
}
