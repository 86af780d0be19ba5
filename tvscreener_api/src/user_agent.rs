/// Desktop Chrome on macOS. The scanner rejects requests that do not look
/// like they come from the TradingView web app.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub(crate) fn get_user_agent() -> &'static str {
    USER_AGENT
}
