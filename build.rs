//! 设置编译平台, 只支持 linux (需要读取 `/proc`)

fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "linux" {
        println!("info: Build on Linux!");
    } else {
        println!("cargo:warning=This project can only be built on Linux, not `{target_os}`!");
        std::process::exit(1);
    }
}
