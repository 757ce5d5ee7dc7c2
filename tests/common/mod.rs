#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use rshuffledns::{parse_flags, Opts};
use tempfile::TempDir;

/// 测试用的输入文件: 解析器、字典、子域名列表、massdns 原始输出
pub struct Fixture {
    pub dir: TempDir,
    pub resolvers: String,
    pub wordlist: String,
    pub list: String,
    pub raw: String,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let write = |name: &str, content: &str| -> String {
            let path: PathBuf = dir.path().join(name);
            fs::write(&path, content).expect("write fixture");
            path.to_string_lossy().into_owned()
        };

        let resolvers = write("resolvers.txt", "1.1.1.1\n8.8.8.8\n");
        let wordlist = write("words.txt", "www\nmail\napi\n");
        let list = write("list.txt", "www.example.com\nmail.example.com\n");
        let raw = write("raw.txt", "www.example.com. A 93.184.216.34\n");

        Fixture {
            dir,
            resolvers,
            wordlist,
            list,
            raw,
        }
    }

    pub fn missing(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    pub fn dir_path(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }
}

pub fn flags(args: &[&str]) -> Opts {
    let mut argv = vec!["rshuffledns"];
    argv.extend_from_slice(args);
    parse_flags(argv).expect("flags should parse")
}

pub fn piped(content: &str) -> Cursor<Vec<u8>> {
    Cursor::new(content.as_bytes().to_vec())
}
