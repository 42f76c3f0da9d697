//! Browser flag classes for the document body (`d-webkit`, `d-ie-11`,
//! `d-rtl`, ...), so stylesheets can target engine quirks.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WEBKIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"WebKit/(\d+(?:\.\d+)?)").unwrap());
static CHROME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:Chrome|CriOS)/(\d+(?:\.\d+)?)").unwrap());
static SAFARI_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Version/(\d+(?:\.\d+)?)").unwrap());
static FIREFOX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Firefox/(\d+(?:\.\d+)?)").unwrap());
static MSIE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"MSIE (\d+(?:\.\d+)?)").unwrap());
static TRIDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Trident/[\d.]+.*?rv:(\d+(?:\.\d+)?)").unwrap());
static ANDROID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Android (\d+(?:\.\d+)?)").unwrap());
static IOS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"iPhone|iPod|iPad").unwrap());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxModel {
    #[default]
    ContentBox,
    BorderBox,
}

impl BoxModel {
    fn class_name(self) -> &'static str {
        match self {
            BoxModel::ContentBox => "d-contentbox",
            BoxModel::BorderBox => "d-borderbox",
        }
    }
}

/// Engine and platform facts sniffed from a user-agent string.
///
/// Version fields hold the parsed `major.minor` number, `None` when the
/// engine is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UaFlags {
    pub webkit: Option<f32>,
    pub chrome: Option<f32>,
    pub safari: Option<f32>,
    pub mozilla: bool,
    pub ff: Option<f32>,
    pub ie: Option<f32>,
    pub ios: bool,
    pub android: Option<f32>,
    pub box_model: BoxModel,
    pub rtl: bool,
}

fn version(re: &Regex, ua: &str) -> Option<f32> {
    re.captures(ua)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f32>().ok())
        .filter(|v| *v > 0.0)
}

impl UaFlags {
    pub fn sniff(user_agent: &str) -> Self {
        let webkit = version(&WEBKIT_RE, user_agent);
        let chrome = version(&CHROME_RE, user_agent);
        let android = version(&ANDROID_RE, user_agent);
        let safari = if user_agent.contains("Safari") && chrome.is_none() && android.is_none() {
            version(&SAFARI_VERSION_RE, user_agent)
        } else {
            None
        };
        let ie = version(&MSIE_RE, user_agent).or_else(|| version(&TRIDENT_RE, user_agent));
        let mozilla = webkit.is_none() && ie.is_none() && user_agent.contains("Gecko/");
        let ff = if webkit.is_none() {
            version(&FIREFOX_RE, user_agent)
        } else {
            None
        };
        Self {
            webkit,
            chrome,
            safari,
            mozilla,
            ff,
            ie,
            ios: IOS_RE.is_match(user_agent),
            android,
            box_model: BoxModel::default(),
            rtl: false,
        }
    }

    pub fn with_box_model(mut self, box_model: BoxModel) -> Self {
        self.box_model = box_model;
        self
    }

    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub fn class_names(&self) -> Vec<String> {
        let mut classes = Vec::new();
        let flags = [
            ("d-webkit", self.webkit.is_some()),
            ("d-safari", self.safari.is_some()),
            ("d-chrome", self.chrome.is_some()),
            ("d-gecko", self.mozilla),
            ("d-ios", self.ios),
            ("d-android", self.android.is_some()),
        ];
        for (name, on) in flags {
            if on {
                classes.push(name.to_string());
            }
        }
        if let Some(ie) = self.ie {
            classes.push("d-ie".to_string());
            classes.push(format!("d-ie-{}", ie.floor() as i32));
        }
        if let Some(ff) = self.ff {
            classes.push(format!("d-ff-{}", ff.floor() as i32));
        }
        classes.push(self.box_model.class_name().to_string());
        if self.rtl {
            classes.push("d-rtl".to_string());
        }
        classes
    }

    /// Append the flag classes to an existing `class` attribute value.
    pub fn apply_to(&self, existing: &str) -> String {
        let mut out = existing.trim().to_string();
        for class in self.class_names() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&class);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const SAFARI: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15";
    const FIREFOX: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const IE11: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64; Trident/7.0; rv:11.0) like Gecko";
    const IE9: &str = "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; Trident/5.0)";
    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1";
    const ANDROID: &str = "Mozilla/5.0 (Linux; Android 4.4.2; Nexus 5 Build/KOT49H) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/30.0.0.0 Mobile Safari/537.36";

    #[test]
    fn chrome_is_webkit_but_not_safari() {
        let flags = UaFlags::sniff(CHROME);
        assert_eq!(flags.class_names(), vec!["d-webkit", "d-chrome", "d-contentbox"]);
        assert_eq!(flags.chrome, Some(120.0));
    }

    #[test]
    fn desktop_safari() {
        let flags = UaFlags::sniff(SAFARI);
        assert_eq!(flags.safari, Some(17.1));
        assert_eq!(flags.class_names(), vec!["d-webkit", "d-safari", "d-contentbox"]);
    }

    #[test]
    fn firefox_reports_major_version() {
        let flags = UaFlags::sniff(FIREFOX);
        assert_eq!(flags.class_names(), vec!["d-gecko", "d-ff-121", "d-contentbox"]);
    }

    #[test]
    fn internet_explorer_old_and_trident() {
        assert_eq!(
            UaFlags::sniff(IE11).class_names(),
            vec!["d-ie", "d-ie-11", "d-contentbox"]
        );
        assert_eq!(
            UaFlags::sniff(IE9).class_names(),
            vec!["d-ie", "d-ie-9", "d-contentbox"]
        );
    }

    #[test]
    fn mobile_platforms() {
        assert_eq!(
            UaFlags::sniff(IPHONE).class_names(),
            vec!["d-webkit", "d-safari", "d-ios", "d-contentbox"]
        );
        let android = UaFlags::sniff(ANDROID);
        assert_eq!(android.android, Some(4.4));
        assert_eq!(
            android.class_names(),
            vec!["d-webkit", "d-chrome", "d-android", "d-contentbox"]
        );
    }

    #[test]
    fn box_model_and_rtl_come_last() {
        let flags = UaFlags::sniff(FIREFOX)
            .with_box_model(BoxModel::BorderBox)
            .with_rtl(true);
        assert_eq!(
            flags.class_names(),
            vec!["d-gecko", "d-ff-121", "d-borderbox", "d-rtl"]
        );
    }

    #[test]
    fn apply_to_appends_after_existing_classes() {
        let flags = UaFlags::sniff(IE11).with_rtl(true);
        assert_eq!(
            flags.apply_to("  claro "),
            "claro d-ie d-ie-11 d-contentbox d-rtl"
        );
        assert_eq!(UaFlags::default().apply_to(""), "d-contentbox");
    }
}
