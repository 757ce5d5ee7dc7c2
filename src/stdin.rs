use std::io::{self, IsTerminal};

use lazy_static::lazy_static;

/// 判断进程是否带着管道/重定向的标准输入启动
pub trait InputAvailabilityProbe {
    fn has_stdin(&self) -> bool;
}

lazy_static! {
    // 整个进程只探测一次
    static ref STDIN_PIPED: bool = probe_stdin();
}

/// 探测真实进程的标准输入，结果在进程内缓存
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalProbe;

impl InputAvailabilityProbe for TerminalProbe {
    fn has_stdin(&self) -> bool {
        *STDIN_PIPED
    }
}

/// 固定结果的探测器，测试时替换真实的标准输入
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub bool);

impl InputAvailabilityProbe for FixedProbe {
    fn has_stdin(&self) -> bool {
        self.0
    }
}

#[cfg(unix)]
fn probe_stdin() -> bool {
    use std::fs::File;
    use std::os::fd::AsFd;
    use std::os::unix::fs::FileTypeExt;

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return false;
    }

    // 复制描述符只为了 fstat，不读取任何数据
    let fd = match stdin.as_fd().try_clone_to_owned() {
        Ok(fd) => fd,
        Err(e) => {
            log::debug!("stdin probe failed to duplicate descriptor: {}", e);
            return false;
        }
    };
    match File::from(fd).metadata() {
        Ok(meta) => {
            let kind = meta.file_type();
            kind.is_fifo() || kind.is_file() || kind.is_socket()
        }
        Err(e) => {
            log::debug!("stdin probe failed to stat descriptor: {}", e);
            false
        }
    }
}

#[cfg(not(unix))]
fn probe_stdin() -> bool {
    !io::stdin().is_terminal()
}
