use ammonia::clean_text;

use crate::models::notification::Notification;

/// 渲染通知列表，未读项带 `unread` 样式
///
/// 消息来自其他用户输入，一律转义后再拼接。
pub fn render_notification_items(items: &[Notification]) -> String {
    items.iter().map(render_notification_item).collect()
}

pub fn render_notification_item(item: &Notification) -> String {
    let class = if item.is_unread() {
        "notification-item unread"
    } else {
        "notification-item"
    };

    // 时间戳按服务端原样展示
    format!(
        r#"<div class="{}"><p>{}</p><small>{}</small></div>"#,
        class,
        clean_text(&item.message),
        clean_text(&item.timestamp)
    )
}

/// 空白字符同样会被编码成实体（`&#32;` 等），浏览器显示不受影响
pub fn render_placeholder(text: &str) -> String {
    format!("<p>{}</p>", clean_text(text))
}
