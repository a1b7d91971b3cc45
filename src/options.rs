//! 起動オプション
//!
//! コマンドライン引数と環境変数から実行設定を組み立てる。設定ファイルは持たない。

use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};

/// ログレベル指定の環境変数
pub const LOG_LEVEL_ENV: &str = "CRUDPAD_LOG";

/// 実行オプション
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppOptions {
    /// 相対ファイル名の基準ディレクトリ（未指定時はカレントディレクトリ）
    pub base_dir: Option<PathBuf>,
    /// デバッグログ出力先（未指定時はログファイルなし）
    pub debug_log_path: Option<PathBuf>,
    /// ログレベル
    pub log_level: Option<log::LevelFilter>,
    /// 起動時にファイル名欄へ入れる名前
    pub initial_file: Option<String>,
    /// ヘルプ表示のみ
    pub show_help: bool,
    /// バージョン表示のみ
    pub show_version: bool,
}

impl AppOptions {
    /// 引数列からパース（プログラム名は含めない）
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut options = AppOptions::default();

        let mut iter = args.iter().peekable();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => options.show_help = true,
                "-V" | "--version" => options.show_version = true,
                "--dir" | "-C" => {
                    let value = iter.next().ok_or_else(|| missing_value(arg))?;
                    options.base_dir = Some(PathBuf::from(value));
                }
                "--debug-log" => {
                    // 値が省略された場合は既定パス
                    let path = match iter.peek() {
                        Some(next) if !next.starts_with('-') => {
                            let path = PathBuf::from(next.as_str());
                            iter.next();
                            Some(path)
                        }
                        _ => default_log_path(),
                    };
                    options.debug_log_path = path;
                }
                "--log-level" => {
                    let value = iter.next().ok_or_else(|| missing_value(arg))?;
                    options.log_level = Some(parse_level(value)?);
                }
                other if other.starts_with('-') => {
                    return Err(ConfigError::UnknownOption {
                        option: other.to_string(),
                    }
                    .into());
                }
                positional => {
                    options.initial_file = Some(positional.to_string());
                }
            }
        }

        Ok(options)
    }

    /// 環境変数で未指定項目を補う
    pub fn with_env_defaults(mut self) -> Result<Self> {
        if self.log_level.is_none() {
            if let Ok(value) = std::env::var(LOG_LEVEL_ENV) {
                self.log_level = Some(parse_level(&value)?);
            }
        }
        Ok(self)
    }

    /// 基準ディレクトリ
    pub fn resolved_base_dir(&self) -> PathBuf {
        self.base_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// ログレベル（未指定時は Info）
    pub fn resolved_log_level(&self) -> log::LevelFilter {
        self.log_level.unwrap_or(log::LevelFilter::Info)
    }

    /// 使い方
    pub fn usage() -> &'static str {
        "Usage: crudpad [OPTIONS] [FILE]\n\
         \n\
         Options:\n  \
           -C, --dir <DIR>         resolve relative file names against DIR\n  \
           --debug-log [PATH]      write JSON Lines debug log (default ~/.crudpad-log/debug.log)\n  \
           --log-level <LEVEL>     off, error, warn, info, debug, trace\n  \
           -h, --help              print this help\n  \
           -V, --version           print version"
    }
}

fn missing_value(option: &str) -> crate::error::AppError {
    ConfigError::MissingValue {
        option: option.to_string(),
    }
    .into()
}

fn parse_level(value: &str) -> Result<log::LevelFilter> {
    value.parse::<log::LevelFilter>().map_err(|_| {
        ConfigError::InvalidValue {
            key: "log-level".to_string(),
            value: value.to_string(),
        }
        .into()
    })
}

fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".crudpad-log").join("debug.log"))
}

/// ヘルパー：親ディレクトリを作成
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
