//! 文本分块器
//!
//! 将编辑后的长 markdown 文本切分为若干块，优先在段落边界（空行）处分割

/// 默认单块最大字符数
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 10_000;

/// 段落分隔符（空行）
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// 分块配置
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// 单块最大字符数（按 Unicode 字符计，而非字节）
    pub max_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

impl ChunkConfig {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

/// 第 n 个字符的字节偏移；字符数不足 n 时返回文本长度
#[inline]
fn byte_offset_of_char(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// 在窗口内从后向前查找段落分隔符
///
/// 位于 0 处的分隔符（上一块留下的）不算分割点，否则会产生空块且无法前进
#[inline]
fn find_split_point(window: &str) -> Option<usize> {
    window.rfind(PARAGRAPH_SEPARATOR).filter(|&offset| offset > 0)
}

/// 对文本进行分块
///
/// 分块策略：
/// 1. 剩余文本不超过 `max_chars` 时整体作为最后一块
/// 2. 否则在前 `max_chars` 个字符内从后向前找空行，分隔符保留在下一块开头
/// 3. 找不到空行时在 `max_chars` 处硬切
///
/// 空文本返回空序列；所有块按顺序拼接后等于原文
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    let max_chars = config.max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let limit = byte_offset_of_char(rest, max_chars);
        if limit == rest.len() {
            chunks.push(rest.to_string());
            break;
        }

        let split_at = find_split_point(&rest[..limit]).unwrap_or(limit);
        let (head, tail) = rest.split_at(split_at);
        chunks.push(head.to_string());
        rest = tail;
    }

    chunks
}

/// 使用默认配置分块（便捷方法）
pub fn chunk_text_default(text: &str) -> Vec<String> {
    chunk_text(text, &ChunkConfig::default())
}
