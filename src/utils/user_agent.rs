// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! User-Agent 解析
//!
//! 按关键词顺序识别浏览器、操作系统和设备。检查顺序很重要，
//! 许多 User-Agent 同时包含后续检查使用的关键词（例如 Opera 和 Edge 都带有 "Chrome"）。

use once_cell::sync::Lazy;
use regex::Regex;

static BLACKBERRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(BlackBerry|PlayBook|BB10)").expect("valid regex"));

/// 识别浏览器名称
pub fn browser(user_agent: &str) -> Option<&'static str> {
    let ua = user_agent;
    if ua.contains(" OPR/") {
        if ua.contains("Mini") {
            Some("Opera Mini")
        } else {
            Some("Opera")
        }
    } else if BLACKBERRY.is_match(ua) {
        Some("BlackBerry")
    } else if ua.contains("IEMobile") || ua.contains("WPDesktop") {
        Some("Internet Explorer Mobile")
    } else if ua.contains("Edge") {
        Some("Microsoft Edge")
    } else if ua.contains("FBIOS") {
        Some("Facebook Mobile")
    } else if ua.contains("Chrome") {
        Some("Chrome")
    } else if ua.contains("CriOS") {
        Some("Chrome iOS")
    } else if ua.contains("UCWEB") || ua.contains("UCBrowser") {
        Some("UC Browser")
    } else if ua.contains("FxiOS") {
        Some("Firefox iOS")
    } else if ua.contains("Safari") {
        if ua.contains("Mobile") {
            Some("Mobile Safari")
        } else {
            Some("Safari")
        }
    } else if ua.contains("Android") {
        Some("Android Mobile")
    } else if ua.contains("Konqueror") {
        Some("Konqueror")
    } else if ua.contains("Firefox") {
        Some("Firefox")
    } else if ua.contains("MSIE") || ua.contains("Trident/") {
        Some("Internet Explorer")
    } else if ua.contains("Gecko") {
        Some("Mozilla")
    } else {
        None
    }
}

fn version_pattern(browser: &str) -> Option<&'static Regex> {
    static PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
        [
            ("Internet Explorer Mobile", r"rv:(?P<v>\d+(?:\.\d+)?)"),
            ("Microsoft Edge", r"Edge/(?P<v>\d+(?:\.\d+)?)"),
            ("Chrome", r"Chrome/(?P<v>\d+(?:\.\d+)?)"),
            ("Chrome iOS", r"CriOS/(?P<v>\d+(?:\.\d+)?)"),
            ("UC Browser", r"(?:UCBrowser|UCWEB)/(?P<v>\d+(?:\.\d+)?)"),
            ("Safari", r"Version/(?P<v>\d+(?:\.\d+)?)"),
            ("Mobile Safari", r"Version/(?P<v>\d+(?:\.\d+)?)"),
            ("Opera", r"(?:Opera|OPR)/(?P<v>\d+(?:\.\d+)?)"),
            ("Firefox", r"Firefox/(?P<v>\d+(?:\.\d+)?)"),
            ("Firefox iOS", r"FxiOS/(?P<v>\d+(?:\.\d+)?)"),
            ("Konqueror", r"Konqueror:(?P<v>\d+(?:\.\d+)?)"),
            ("BlackBerry", r"BlackBerry (?P<v>\d+(?:\.\d+)?)"),
            ("Android Mobile", r"android\s(?P<v>\d+(?:\.\d+)?)"),
            ("Internet Explorer", r"(?:rv:|MSIE )(?P<v>\d+(?:\.\d+)?)"),
            ("Mozilla", r"rv:(?P<v>\d+(?:\.\d+)?)"),
        ]
        .into_iter()
        .map(|(name, pattern)| (name, Regex::new(pattern).expect("valid regex")))
        .collect()
    });

    PATTERNS
        .iter()
        .find(|(name, _)| *name == browser)
        .map(|(_, regex)| regex)
}

/// 解析浏览器主次版本号（例如 42.1）
pub fn browser_version(user_agent: &str) -> Option<f64> {
    let regex = version_pattern(browser(user_agent)?)?;
    regex
        .captures(user_agent)?
        .name("v")?
        .as_str()
        .parse()
        .ok()
}

/// 识别操作系统
pub fn os(user_agent: &str) -> Option<&'static str> {
    static WINDOWS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Windows").expect("valid regex"));
    static MAC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Mac").expect("valid regex"));

    let ua = user_agent;
    if WINDOWS.is_match(ua) {
        if ua.contains("Phone") || ua.contains("WPDesktop") {
            Some("Windows Phone")
        } else {
            Some("Windows")
        }
    } else if ua.contains("iPhone") || ua.contains("iPad") || ua.contains("iPod") {
        Some("iOS")
    } else if ua.contains("Android") {
        Some("Android")
    } else if BLACKBERRY.is_match(ua) {
        Some("BlackBerry")
    } else if MAC.is_match(ua) {
        Some("macOS")
    } else if ua.contains("Linux") {
        Some("Linux")
    } else if ua.contains("CrOS") {
        Some("Chrome OS")
    } else {
        None
    }
}

/// 根据 User-Agent 识别设备
pub fn device(user_agent: &str) -> Option<&'static str> {
    static WINDOWS_PHONE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)Windows Phone").expect("valid regex"));

    let ua = user_agent;
    if WINDOWS_PHONE.is_match(ua) || ua.contains("WPDesktop") {
        Some("Windows Phone")
    } else if ua.contains("iPad") {
        Some("iPad")
    } else if ua.contains("iPod") {
        Some("iPod Touch")
    } else if ua.contains("iPhone") {
        Some("iPhone")
    } else if BLACKBERRY.is_match(ua) {
        Some("BlackBerry")
    } else if ua.contains("Android") {
        Some("Android")
    } else if ua.contains("Macintosh") {
        Some("Mac")
    } else {
        None
    }
}
