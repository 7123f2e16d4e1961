use std::io::Write;

use anyhow::Result;

use super::flush_logs;

#[test]
fn it_flushes_buffered_logs_on_shutdown() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file_appender = tracing_appender::rolling::never(dir.path(), "debug.log");
    let (mut writer, guard) = tracing_appender::non_blocking(file_appender);

    writer.write_all(b"{\"message\":\"last words\"}\n")?;
    flush_logs(guard);

    let contents = std::fs::read_to_string(dir.path().join("debug.log"))?;
    assert_eq!(contents, "{\"message\":\"last words\"}\n");

    return Ok(());
}
