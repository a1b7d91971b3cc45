//! ロギングシステム
//!
//! `log` ファサードのバックエンド。TUI が端末を使っている間は標準エラーへ書かず、
//! デバッグログファイルが指定されていれば JSON Lines 形式で追記する。

use crate::options::{ensure_parent_dir, AppOptions};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// ログ1行分のレコード
#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    ts: u128,
    level: &'a str,
    target: &'a str,
    message: String,
}

/// ロガー
pub struct Logger {
    level: log::LevelFilter,
    output_stderr: AtomicBool,
    output_file: Option<Mutex<std::fs::File>>,
    file_path: Option<PathBuf>,
}

impl Logger {
    /// デフォルト構築（標準エラーのみ）
    pub fn new(level: log::LevelFilter) -> Self {
        Self {
            level,
            output_stderr: AtomicBool::new(true),
            output_file: None,
            file_path: None,
        }
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> io::Result<Self> {
        let path = path.into();
        ensure_parent_dir(&path)?;
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        self.output_file = Some(Mutex::new(file));
        self.file_path = Some(path);
        Ok(self)
    }

    /// 標準エラー出力を無効化
    pub fn without_stderr(self) -> Self {
        self.output_stderr.store(false, Ordering::Relaxed);
        self
    }

    pub fn level(&self) -> log::LevelFilter {
        self.level
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn write_record(&self, record: &log::Record<'_>) -> io::Result<()> {
        if self.output_stderr.load(Ordering::Relaxed) {
            eprintln!("{}: {}", record.level(), record.args());
        }

        if let Some(file) = &self.output_file {
            let entry = LogRecord {
                ts: timestamp_ms(),
                level: record.level().as_str(),
                target: record.target(),
                message: record.args().to_string(),
            };
            let line = serde_json::to_string(&entry)?;
            // ロック取得に失敗した場合は書き込みを諦める
            if let Ok(mut file) = file.lock() {
                writeln!(file, "{line}")?;
            }
        }
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            let _ = self.write_record(record);
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.output_file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// 起動オプションからロガーを組み立てて登録
///
/// 端末UIと衝突しないよう標準エラー出力は無効にする。
pub fn init(options: &AppOptions) -> io::Result<&'static Logger> {
    let mut logger = Logger::new(options.resolved_log_level()).without_stderr();
    if let Some(path) = &options.debug_log_path {
        logger = logger.with_file_output(path)?;
    }

    let logger: &'static Logger = Box::leak(Box::new(logger));
    log::set_logger(logger)
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e.to_string()))?;
    log::set_max_level(logger.level());
    Ok(logger)
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_millis())
        .unwrap_or_default()
}
