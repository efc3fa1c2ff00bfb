/// Spoofed mobile user agents surfaced in the shield status bar. One
/// is picked per session.
pub const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Linux; Android 13; SM-S901B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/112.0.0.0 Mobile Safari/537.36",
    "Mozilla/5.0 (Linux; Android 12; Pixel 6 Build/SD1A.210817.036) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.4896.127 Mobile Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 16_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.4 Mobile/15E148 Safari/604.1",
];

pub fn pick_user_agent() -> &'static str {
    USER_AGENTS[fastrand::usize(..USER_AGENTS.len())]
}

/// Short device tag for the status bar, e.g. "Mobile-13".
pub fn short_tag(agent: &str) -> String {
    if agent.contains("iPhone") {
        "iOS-16".to_string()
    } else if let Some(rest) = agent.split("Android ").nth(1) {
        let version: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        format!("Mobile-{version}")
    } else {
        "Mobile".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_from_the_static_list() {
        for _ in 0..20 {
            assert!(USER_AGENTS.contains(&pick_user_agent()));
        }
    }

    #[test]
    fn tags_are_derived_from_the_agent() {
        assert_eq!(short_tag(USER_AGENTS[0]), "Mobile-13");
        assert_eq!(short_tag(USER_AGENTS[2]), "iOS-16");
    }
}
