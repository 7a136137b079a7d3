//! Regex patterns and rule tables for parcel notification parsing.
//!
//! Order inside every table is significant: the first entry that matches wins.

use lazy_static::lazy_static;
use regex::Regex;

/// Aggregator names mapped to a fixed display label before suffix stripping.
pub const CARRIER_ALIASES: &[(&str, &str)] = &[("菜鸟裹裹", "菜鸟"), ("菜鸟驿站", "驿站")];

/// Known carrier names, scanned in order when no bracketed name is found.
pub const KNOWN_CARRIERS: &[&str] = &[
    "中通",
    "顺丰",
    "顺丰速运",
    "圆通",
    "申通",
    "韵达",
    "韵达快运",
    "百世",
    "EMS",
    "菜鸟",
    "菜鸟裹裹",
    "菜鸟驿站",
    "京东",
    "京东快递",
    "邮政",
    "天天",
    "德邦",
];

/// Fallback carrier name used by the summary view.
pub const UNKNOWN_CARRIER: &str = "未知快递";

lazy_static! {
    // Carrier name inside 【】, [] or (); pairs may mix
    pub static ref BRACKETED_NAME: Regex = Regex::new(
        r"[【\[\(](.+?)[】\]\)]"
    ).unwrap();

    // Generic company-type suffix, only at the very end
    pub static ref CARRIER_SUFFIX: Regex = Regex::new(
        r"(?:快递|物流|速运|速递|快运|裹裹|快件)$"
    ).unwrap();

    // Pickup code after one of its labels
    pub static ref PICKUP_CODE: Regex = Regex::new(
        r"(?i)(?:取件码|验证码|取件密码|提取码|密码|code)[：:\s]*([A-Za-z0-9\-]{4,20})"
    ).unwrap();

    // Address after a destination/location label
    pub static ref ADDRESS_LABELED: Regex = Regex::new(
        r"(?:至|取件地址[:：]?|地址[:：]?|派送至[:：]?|快件已到|快件到达|请到|地点[:：]?|领取地址[:：]?)([\s\S]+?)(?:取件|领取|请凭码|。|，|,|$)"
    ).unwrap();

    // Address after a locker label
    pub static ref ADDRESS_LOCKER: Regex = Regex::new(
        r"(?:取件地点|取件柜)[:：]?([\s\S]+?)(?:取件|地址|。|，|,|$)"
    ).unwrap();

    // Words dropped from carrier names in the summary view
    pub static ref DISPLAY_NOISE: Regex = Regex::new(
        r"快递|物流|\s+"
    ).unwrap();

    // Batch input delimiters
    pub static ref BATCH_DELIMITER: Regex = Regex::new(
        r"\r?\n|;"
    ).unwrap();
}
