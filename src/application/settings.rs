//! 编辑流程设置
//!
//! 由配置层构造，注入到命令/查询处理器

use crate::domain::chunker::ChunkConfig;
use crate::domain::edit::ApiKey;
use crate::domain::log_sink::DEFAULT_LOG_CAPACITY;

/// 默认提示词（教案编辑模板）
pub const DEFAULT_PROMPT: &str = "你是专业又善于教学分享的空间分析师，请编辑下方教案内容（markdown 格式），以方便学生理解。

要求：
1. 所有🚩出现的地方，都是需要修改的。具体修改方式：
 - 如果 🚩 出现在 markdown 正文中，请按照 “🚩：”后面的文字补充内容，篇幅 1-3 段落，新增 1-3 段落；
 - 如果 🚩针对的是输出解读，可以提示你不能按要求完成解读的原因；
 - 如果 🚩 出现在代码注释中，请按照 🚩 后方的提示，后缀注释。

2. 没有🚩的已有内容，不作任何修改；
3. 修改后，生成的内容以为 markdown 格式提供、以便下载；
4. 仔细检查生成的内容，避免任何遗漏；
4. 参考我提供给你的 markdown 代码格式，所有 python 代码应该包裹在 【```python ```】里面；
5. 如果生成内容过长，请分作 2-3 份 markdown 文件提供，以免被阶段。
6. 分作多份markdown文件提供时，下一份输出文件总是从上一份输出文件的最后一段 markdown 段落开始。";

/// 编辑流程设置
#[derive(Debug, Clone)]
pub struct EditSettings {
    /// 表单未填写密钥时使用的默认密钥
    pub default_api_key: Option<ApiKey>,
    /// 表单未填写提示词时使用的默认提示词
    pub default_prompt: String,
    /// 分块配置
    pub chunk: ChunkConfig,
    /// 每个会话的日志缓冲行数
    pub log_capacity: usize,
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            default_api_key: None,
            default_prompt: DEFAULT_PROMPT.to_string(),
            chunk: ChunkConfig::default(),
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl EditSettings {
    /// 表单值优先，空白时回退到默认密钥
    pub fn resolve_api_key(&self, submitted: Option<&str>) -> Option<ApiKey> {
        submitted
            .and_then(|key| ApiKey::new(key))
            .or_else(|| self.default_api_key.clone())
    }

    /// 表单值优先，空白时回退到默认提示词
    pub fn resolve_prompt(&self, submitted: Option<&str>) -> String {
        match submitted {
            Some(prompt) if !prompt.trim().is_empty() => prompt.to_string(),
            _ => self.default_prompt.clone(),
        }
    }
}
