//! ルーティングと静的なサイト内容（ナビ・ツール一覧・料金）

/// ページ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    SignUp,
    SignUpVerify,
    ForgotPassword,
    ForgotPasswordVerify,
    MagicStamp,
    Tools,
    Pricing,
    NotFound,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login/login",
            Route::SignUp => "/sign_up/sign_up",
            Route::SignUpVerify => "/sign_up/verify",
            Route::ForgotPassword => "/forget_pwd/forget_pwd",
            Route::ForgotPasswordVerify => "/forget_pwd/forget_pwd_verify",
            Route::MagicStamp => "/magic_stamp",
            Route::Tools => "/tools/tools_list",
            Route::Pricing => "/pricing/pricing",
            Route::NotFound => "/404",
        }
    }

    /// パス → ページ（末尾スラッシュ・クエリ・フラグメントは無視）
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        match path {
            "/" => Route::Home,
            "/login/login" => Route::Login,
            "/sign_up/sign_up" => Route::SignUp,
            "/sign_up/verify" => Route::SignUpVerify,
            "/forget_pwd/forget_pwd" => Route::ForgotPassword,
            "/forget_pwd/forget_pwd_verify" => Route::ForgotPasswordVerify,
            "/magic_stamp" => Route::MagicStamp,
            "/tools/tools_list" => Route::Tools,
            "/pricing/pricing" => Route::Pricing,
            _ => Route::NotFound,
        }
    }
}

/// 先読みするページ
pub const PREFETCH_ROUTES: [Route; 4] = [Route::MagicStamp, Route::Tools, Route::Pricing, Route::Login];

/// 現在のページ以外の先読み対象
pub fn prefetch_targets(current: Route) -> Vec<&'static str> {
    PREFETCH_ROUTES
        .iter()
        .filter(|r| **r != current)
        .map(|r| r.path())
        .collect()
}

/// ナビ項目（`route` が None なら準備中）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub route: Option<Route>,
}

impl NavItem {
    pub fn is_coming_soon(&self) -> bool {
        self.route.is_none()
    }
}

pub const NAVIGATION: [NavItem; 5] = [
    NavItem { name: "首页", route: Some(Route::Home) },
    NavItem { name: "标书工程师", route: None },
    NavItem { name: "魔法工具", route: Some(Route::Tools) },
    NavItem { name: "价格", route: Some(Route::Pricing) },
    NavItem { name: "关于我们", route: None },
];

pub const HERO_TITLE: &str = "标书革命,从AI开始";

/// 表示のフェードイン開始まで（ミリ秒）
pub const FADE_IN_DELAY_MS: u32 = 100;

/// ログイン成功などの後、遷移するまで（ミリ秒）
pub const REDIRECT_DELAY_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub route: Option<Route>,
}

pub const TOOLS: [Tool; 3] = [
    Tool {
        title: "魔法印章",
        description: "一键盖章，支持一键加盖整本印章，一键加盖骑缝章。",
        image: "/img/magic-stamp.jpg",
        route: Some(Route::MagicStamp),
    },
    Tool {
        title: "电子签名",
        description: "智能插入电子签名，支持图片插入，让标书更专业。",
        image: "/img/magic-sign.jpg",
        route: None,
    },
    Tool {
        title: "魔法排版",
        description: "智能识别文档结构，自动调整格式，让标书排版更专业。",
        image: "/img/magic-form.jpg",
        route: None,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingTier {
    pub id: &'static str,
    pub name: &'static str,
    pub price_monthly: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub featured: bool,
}

pub const PRICING_TIERS: [PricingTier; 2] = [
    PricingTier {
        id: "tier-basic",
        name: "基础版",
        price_monthly: "¥0",
        description: "适合个人用户和初次体验的标书制作者",
        features: &["每月10次免费使用", "基础印章功能", "标准模板库", "社区技术支持"],
        featured: false,
    },
    PricingTier {
        id: "tier-pro",
        name: "专业版",
        price_monthly: "¥28",
        description: "适合专业标书制作团队和企业用户",
        features: &[
            "无限次使用",
            "高级印章定制",
            "AI智能排版",
            "7×24小时技术支持",
            "优先响应通道",
            "专属定制服务",
        ],
        featured: true,
    },
];
