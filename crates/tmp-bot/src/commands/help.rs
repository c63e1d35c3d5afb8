//! Help command - displays available commands.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use chat_client::{InboundMessage, MessageSink};

const HELP_TRIGGER: &str = "#TMP帮助";
const HELP_KEYWORD: &str = "TMP帮助";

pub const HELP_TEXT: &str = "🤖 **欧卡2 TMP查询机器人使用说明**

📝 **查询命令**:
- #查询TMP 用户名
- @机器人 查询TMP 用户名
- /查询TMP 用户名

📋 **其他命令**:
- #历史查询 - 查看查询历史
- #TMP帮助 - 显示此帮助信息

🔍 **支持查询**:
- 账号基本信息
- 封禁记录查询
- VTC团队信息

💡 **示例**:
#查询TMP yy10871";

pub struct HelpHandler;

impl HelpHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HelpHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for HelpHandler {
    fn name(&self) -> &str {
        "help"
    }

    fn matches(&self, text: &str) -> bool {
        text == HELP_TRIGGER || text.contains(HELP_KEYWORD)
    }

    async fn execute(
        &self,
        message: &InboundMessage,
        _text: &str,
        sink: &dyn MessageSink,
    ) -> AppResult<()> {
        sink.send(&message.chat_id, HELP_TEXT).await?;
        Ok(())
    }
}
