use std::io::{BufWriter, Write};
use chrono::Utc;

pub type LogStream = BufWriter<Box<dyn Write>>;

pub fn log_event(log_stream: &mut Option<&mut LogStream>, msg: &str) {
    if let Some(&mut ref mut log_stream) = log_stream {
        let now = Utc::now();
        if let Err(e) = writeln!(log_stream, "{}\t{msg}", now.to_rfc2822()).and_then(|_| log_stream.flush()) {
            eprintln!("W: Failed to write log, got '{e}'");
        }
    }
}
