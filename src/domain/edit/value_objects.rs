//! Edit Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::chunker::{chunk_text, ChunkConfig};

/// 编辑会话唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 上传的 markdown 文档（读取后不可变）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document(String);

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// 从上传的字节构造，要求为合法 UTF-8
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, std::string::FromUtf8Error> {
        String::from_utf8(bytes).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// API 密钥，Debug 输出时脱敏
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// 空白密钥视为缺失
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// 一次编辑请求（每次用户操作构造，不持久化）
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub api_key: ApiKey,
    pub prompt: String,
    pub document: Document,
}

impl EditRequest {
    pub fn new(api_key: ApiKey, prompt: impl Into<String>, document: Document) -> Self {
        Self {
            api_key,
            prompt: prompt.into(),
            document,
        }
    }

    /// 发送给模型的完整输入：prompt + 空行 + 文档
    pub fn combined_input(&self) -> String {
        format!("{}\n\n{}", self.prompt, self.document.as_str())
    }
}

/// 远程编辑结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    Success(String),
    Failure(String),
}

/// 分块结果：按原文顺序排列的非空文本块
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkSet(Vec<String>);

impl ChunkSet {
    pub fn from_text(text: &str, config: &ChunkConfig) -> Self {
        Self(chunk_text(text, config))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ChunkSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
