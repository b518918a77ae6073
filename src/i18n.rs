//! Interface strings for the two supported languages.
//!
//! The language is always passed in explicitly; there is no process-wide
//! "current language".

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Zh,
}

impl Lang {
    /// Name of the language in itself, for the selector
    pub fn native_name(&self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Zh => "中文",
        }
    }
}

// (key, en, zh)
const ENTRIES: &[(&str, &str, &str)] = &[
    ("search.placeholder", "Ticker", "股票代码"),
    ("search.market.us", "US", "美股"),
    ("search.market.hk", "HK", "港股"),
    ("search.market.cn", "CN", "A股"),
    ("search.action", "Search", "查询"),
    ("analysis.ask.placeholder", "Ask model (optional)", "向模型提问 (可选)"),
    ("analysis.action", "Analyze", "分析"),
    ("analysis.title", "Model Analysis", "模型分析"),
    ("loading", "Loading...", "加载中..."),
    ("empty.prompt", "Enter a ticker to search.", "请输入股票代码查询。"),
    ("empty.table", "No data", "暂无数据"),
    ("summary.title", "Statistical Summary", "基础统计摘要"),
    ("summary.range", "Range", "区间"),
    ("metric.count", "Days", "样本天数"),
    ("metric.count.hint", "Trading days", "交易日数量"),
    ("metric.mean_close", "Mean Close", "均价"),
    ("metric.mean_close.hint", "Average closing price", "收盘价均值"),
    ("metric.vol_mean", "Mean Volume", "均量"),
    ("metric.vol_mean.hint", "Average daily volume", "平均成交量"),
    ("metric.return_pct", "Return", "区间收益"),
    ("metric.return_pct.hint", "Latest / First - 1", "最新价 / 起始价 - 1"),
    ("metric.max_drawdown_pct", "Max Drawdown", "最大回撤"),
    ("metric.max_drawdown_pct.hint", "Peak to trough", "峰值至谷底最大跌幅"),
    ("metric.volatility_pct", "Volatility", "波动率"),
    ("metric.volatility_pct.hint", "Std of daily returns", "日收益标准差"),
    ("settings.mode", "Mode", "模型模式"),
    ("settings.mode.local", "Local", "本地"),
    ("settings.mode.cloud", "Cloud", "云端"),
    ("settings.api_key", "API Key", "API Key"),
    ("settings.api_key.placeholder", "Cloud model API key", "输入云端模型 API Key"),
    ("settings.local_model", "Local Model Name", "本地模型名称"),
    ("settings.language", "Language", "界面语言"),
    ("settings.save", "Save", "保存"),
    ("nav.home", "Home", "主页"),
    ("nav.movers", "Movers", "涨跌榜"),
    ("nav.upcoming", "Upcoming", "财报日历"),
    ("nav.settings", "Settings", "设置"),
    ("footer.disclaimer", "Beta Scaffold - Not investment advice", "Beta Scaffold - 不构成投资建议"),
    ("chart.close", "Close Price", "收盘价走势"),
    ("chart.empty", "No price data", "暂无价格数据"),
    ("label.date", "Date", "日期"),
    ("movers.gainers", "Gainers", "涨幅榜"),
    ("movers.losers", "Losers", "跌幅榜"),
    ("table.symbol", "Symbol", "代码"),
    ("table.name", "Name", "名称"),
    ("table.price", "Price", "价格"),
    ("table.change", "Change", "涨跌额"),
    ("table.change_pct", "Change %", "涨跌幅"),
    ("table.volume", "Volume", "成交量"),
    ("table.market_cap", "Mkt Cap", "市值"),
    ("upcoming.earnings_date", "Earnings Date", "财报日期"),
    ("upcoming.session", "Session", "时段"),
    ("upcoming.pre", "Pre", "盘前"),
    ("upcoming.post", "Post", "盘后"),
    ("earnings.title", "Earnings", "财报"),
    ("earnings.next", "Next Earnings", "下次财报"),
    ("earnings.empty", "No earnings available", "暂无财报数据"),
    ("earnings.eps_estimate", "EPS Est.", "EPS 预期"),
    ("earnings.eps_actual", "EPS Act.", "EPS 实际"),
    ("earnings.surprise", "Surprise", "超预期"),
    ("earnings.surprise_pct", "Surprise %", "超预期 %"),
    ("news.title", "Recent News", "近期新闻"),
    ("news.count", "Count", "条数"),
    ("news.empty", "No recent news available", "暂无近期新闻"),
    ("expand", "Expand", "展开"),
    ("collapse", "Collapse", "收起"),
];

static DICTIONARY: Lazy<HashMap<Lang, HashMap<&'static str, &'static str>>> = Lazy::new(|| {
    let mut en = HashMap::with_capacity(ENTRIES.len());
    let mut zh = HashMap::with_capacity(ENTRIES.len());
    for &(key, en_text, zh_text) in ENTRIES {
        en.insert(key, en_text);
        zh.insert(key, zh_text);
    }
    HashMap::from([(Lang::En, en), (Lang::Zh, zh)])
});

/// Translated string, or the key itself when there is no entry.
pub fn t<'a>(lang: Lang, key: &'a str) -> &'a str {
    DICTIONARY
        .get(&lang)
        .and_then(|table| table.get(key).copied())
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_both_languages() {
        assert_eq!(t(Lang::En, "search.action"), "Search");
        assert_eq!(t(Lang::Zh, "search.action"), "查询");
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        assert_eq!(t(Lang::Zh, "no.such.key"), "no.such.key");
    }

    #[test]
    fn keys_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for (key, _, _) in ENTRIES {
            assert!(seen.insert(key), "duplicate key {}", key);
        }
    }
}
