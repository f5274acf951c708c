// =========================================================
// 跨平台日志宏
// =========================================================
//
// wasm32 下写入浏览器控制台，本机（测试）下写入 stdout/stderr。

#[doc(hidden)]
#[derive(Debug, Clone, Copy)]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[doc(hidden)]
#[cfg(target_arch = "wasm32")]
pub fn write(level: Level, msg: &str) {
    match level {
        Level::Info => web_sys::console::log_1(&msg.into()),
        Level::Warn => web_sys::console::warn_1(&msg.into()),
        Level::Error => web_sys::console::error_1(&msg.into()),
    }
}

#[doc(hidden)]
#[cfg(not(target_arch = "wasm32"))]
pub fn write(level: Level, msg: &str) {
    match level {
        Level::Info => println!("{}", msg),
        Level::Warn | Level::Error => eprintln!("{}", msg),
    }
}

#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => ($crate::log::write($crate::log::Level::Info, &format!($($t)*)))
}

#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => ($crate::log::write($crate::log::Level::Warn, &format!($($t)*)))
}

#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => ($crate::log::write($crate::log::Level::Error, &format!($($t)*)))
}
