//! トップページ背景アニメーションの差し替え口

/// 背景アニメーション（外部ライブラリ）の開始/停止
pub trait BackgroundAnimation {
    fn start(&mut self);
    fn stop(&mut self);
}

/// 何もしない実装（ライブラリを読めなかったときなど）
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnimation;

impl BackgroundAnimation for NoAnimation {
    fn start(&mut self) {}

    fn stop(&mut self) {}
}

/// 背景グラデーションの配色
pub const FLUID_COLORS: [&str; 6] = [
    "#3e228b", "#6C58EE", "#2d1969", "#6e43e9", "#000000", "#180c3d",
];

impl<A: BackgroundAnimation + ?Sized> BackgroundAnimation for Box<A> {
    fn start(&mut self) {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl BackgroundAnimation for Recorder {
        fn start(&mut self) {
            self.calls.push("start");
        }

        fn stop(&mut self) {
            self.calls.push("stop");
        }
    }

    #[test]
    fn test_boxed_animation_delegates() {
        let mut boxed: Box<Recorder> = Box::default();
        boxed.start();
        boxed.stop();
        assert_eq!(boxed.calls, vec!["start", "stop"]);
    }

    #[test]
    fn test_no_animation_is_usable_as_trait_object() {
        let mut anim: Box<dyn BackgroundAnimation> = Box::new(NoAnimation);
        anim.start();
        anim.stop();
    }
}
