/// Rendering surface of the fingerprint screen.
///
/// 指纹界面的渲染端口：一个图标和一行提示文字。
pub trait ScreenPort: Send + Sync {
    fn set_instruction(&self, text: &str);

    fn set_icon_enabled(&self, enabled: bool);
}
