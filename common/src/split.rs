//! 左右分割コンテナの状態
//!
//! ポインタ操作をイベントとして受け取り、分割位置（%）と
//! 各ペインのぼかし表示を導出する。

/// 分割位置の下限・上限（%）
pub const MIN_POSITION: f64 = 20.0;
pub const MAX_POSITION: f64 = 80.0;
pub const DEFAULT_POSITION: f64 = 60.0;

/// これ未満の幅をモバイルとみなす（px）
pub const MOBILE_BREAKPOINT: f64 = 768.0;
pub const MOBILE_BLUR_THRESHOLD: f64 = 45.0;
pub const DESKTOP_BLUR_THRESHOLD: f64 = 25.0;

/// キーボード操作1回の移動量（%）
pub const KEYBOARD_STEP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitEvent {
    /// 分割線上でポインタを押した
    PointerDown,
    /// ドラッグ中の移動（`client_x` はページ座標、コンテナの左端と幅も渡す）
    PointerMove {
        client_x: f64,
        container_left: f64,
        container_width: f64,
    },
    PointerUp,
    /// ブラウザがポインタを奪った（タッチのスクロール開始など）
    PointerCancel,
    /// ウィンドウ幅の変化
    Resize { viewport_width: f64 },
    /// 矢印キー（負で左）
    Nudge { delta: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitState {
    position: f64,
    dragging: bool,
    viewport_width: f64,
}

impl Default for SplitState {
    fn default() -> Self {
        Self::new(f64::INFINITY)
    }
}

impl SplitState {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            position: DEFAULT_POSITION,
            dragging: false,
            viewport_width,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport_width < MOBILE_BREAKPOINT
    }

    fn blur_threshold(&self) -> f64 {
        if self.is_mobile() {
            MOBILE_BLUR_THRESHOLD
        } else {
            DESKTOP_BLUR_THRESHOLD
        }
    }

    pub fn left_width(&self) -> f64 {
        self.position
    }

    pub fn right_width(&self) -> f64 {
        100.0 - self.position
    }

    /// 左ペインが閾値より狭い
    pub fn left_blurred(&self) -> bool {
        self.left_width() < self.blur_threshold()
    }

    pub fn right_blurred(&self) -> bool {
        self.right_width() < self.blur_threshold()
    }

    /// 位置を直接設定（範囲内に丸める）
    pub fn set_position(&mut self, position: f64) {
        if position.is_finite() {
            self.position = position.clamp(MIN_POSITION, MAX_POSITION);
        }
    }

    /// イベントを適用。ドラッグ開始/終了が変化したら true（カーソル等の切替用）
    pub fn apply(&mut self, event: SplitEvent) -> bool {
        match event {
            SplitEvent::PointerDown => {
                let changed = !self.dragging;
                self.dragging = true;
                changed
            }
            SplitEvent::PointerUp | SplitEvent::PointerCancel => {
                let changed = self.dragging;
                self.dragging = false;
                changed
            }
            SplitEvent::PointerMove {
                client_x,
                container_left,
                container_width,
            } => {
                if self.dragging && container_width > 0.0 {
                    let percent = (client_x - container_left) / container_width * 100.0;
                    self.set_position(percent);
                }
                false
            }
            SplitEvent::Resize { viewport_width } => {
                self.viewport_width = viewport_width;
                false
            }
            SplitEvent::Nudge { delta } => {
                self.set_position(self.position + delta);
                false
            }
        }
    }
}
