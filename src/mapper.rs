// 路径映射模块
//
// 把 Windows 盘符路径翻译成调用方（Linux 侧）的挂载路径。
// 纯函数，无 I/O，无状态。

/// 把 Windows 路径映射到 Linux 挂载点
///
/// `mount_prefix` 未配置时原样返回。只有 `<盘符>:<路径>` 形式的
/// 盘符根路径会被改写：盘符转大写，反斜杠转正斜杠，去掉开头的
/// 分隔符。UNC 路径和相对路径原样通过（已知限制，不是缺陷）。
///
/// 示例: `C:\Users\User\file.txt` + `/mnt/win`
///   -> `/mnt/win/C/Users/User/file.txt`
pub fn map_windows_path(path: &str, mount_prefix: Option<&str>) -> String {
    let Some(prefix) = mount_prefix else {
        return path.to_string();
    };

    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(drive), Some(':')) if drive.is_ascii_alphabetic() => {
            // 前两个字符都是 ASCII，字节下标 2 一定落在字符边界上
            let rest = path[2..]
                .trim_start_matches(|c| c == '\\' || c == '/')
                .replace('\\', "/");
            format!("{}/{}/{}", prefix, drive.to_ascii_uppercase(), rest)
        }
        _ => path.to_string(),
    }
}
