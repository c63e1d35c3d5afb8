//! Rendering of lookup outcomes as chat replies.

use chrono::{DateTime, FixedOffset, Utc};
use tmp_client::{AccountRecord, LookupOutcome, OnlineState};

/// Profile page for an account id.
pub const PROFILE_URL: &str = "https://truckersmp.com/user/";

/// Turns a [`LookupOutcome`] into reply text.
///
/// Dates are rendered zh-CN style in a fixed offset so the output does not
/// depend on the host's timezone.
#[derive(Debug, Clone, Copy)]
pub struct ResultFormatter {
    utc_offset: FixedOffset,
}

impl ResultFormatter {
    pub fn new(utc_offset: FixedOffset) -> Self {
        Self { utc_offset }
    }

    pub fn format(&self, outcome: &LookupOutcome) -> String {
        match outcome {
            LookupOutcome::NotFound(reason) => format!("❌ 查询失败：{}", reason),
            LookupOutcome::Found(record) => self.format_record(record),
        }
    }

    fn format_record(&self, user: &AccountRecord) -> String {
        let mut response = String::from("🚛 **TMP账号查询结果** 🚛\n\n");
        response.push_str(&format!("👤 **用户名**: {}\n", user.display_name));
        response.push_str(&format!("🆔 **TMP ID**: {}\n", user.id));
        response.push_str(&format!(
            "🕒 **加入时间**: {}\n",
            self.date(&user.join_date)
        ));
        response.push_str(&format!("🎮 **Steam名称**: {}\n", user.platform.display_name));
        response.push_str(&format!("📊 **游戏时长**: {}\n", user.online_time));

        let presence = match user.online_state {
            OnlineState::Online => "🟢 在线",
            OnlineState::Offline => "🔴 离线",
        };
        response.push_str(&format!("🟢 **在线状态**: {}\n", presence));

        match &user.vtc {
            Some(vtc) => response.push_str(&format!("🚚 **所属VTC**: {} [{}]\n", vtc.name, vtc.tag)),
            None => response.push_str("🚚 **所属VTC**: 无\n"),
        }

        response.push_str(&self.ban_status(user));

        response.push_str(&format!("\n🔗 **查询链接**: {}{}\n", PROFILE_URL, user.id));
        response.push_str("\n💡 提示：发送 \"#查询TMP 用户名\" 继续查询其他用户");

        response
    }

    fn ban_status(&self, user: &AccountRecord) -> String {
        if let Some(ban) = user.current_ban() {
            return format!(
                "⚠️ **封禁状态**: 🚫 已封禁\n📝 **封禁原因**: {}\n⏰ **解封时间**: {}\n",
                ban.reason,
                self.datetime(&ban.expire_time)
            );
        }

        if user.bans.is_empty() {
            "⚠️ **封禁状态**: ✅ 正常 (无封禁记录)\n".into()
        } else {
            format!(
                "⚠️ **封禁状态**: ✅ 正常 (历史封禁: {}次)\n",
                user.bans.len()
            )
        }
    }

    fn date(&self, at: &DateTime<Utc>) -> String {
        at.with_timezone(&self.utc_offset)
            .format("%Y/%-m/%-d")
            .to_string()
    }

    fn datetime(&self, at: &DateTime<Utc>) -> String {
        at.with_timezone(&self.utc_offset)
            .format("%Y/%-m/%-d %H:%M:%S")
            .to_string()
    }
}
