#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use xbase::{Config, Session};

#[derive(Arbitrary, Debug)]
enum SessionOp {
    Create(String),
    Use(String),
    AddField { name: String, kind: String, width: u16, decimals: u8 },
    AddRecord(Vec<String>),
    SetRecord(bool),
    SetRelation { field: String, table: String },
    List(String),
    Raw(String),
}

impl SessionOp {
    fn line(&self) -> String {
        match self {
            SessionOp::Create(name) => format!("CREATE {}", name),
            SessionOp::Use(name) => format!("USE {}", name),
            SessionOp::AddField {
                name,
                kind,
                width,
                decimals,
            } => format!("ADD FIELD {} {} {} {}", name, kind, width, decimals),
            SessionOp::AddRecord(values) => format!("ADD RECORD {}", values.join(" ")),
            SessionOp::SetRecord(on) => format!("SET RECORD {}", if *on { "ON" } else { "OFF" }),
            SessionOp::SetRelation { field, table } => {
                format!("SET RELATION TO {} INTO {}", field, table)
            }
            SessionOp::List(args) => format!("LIST {}", args),
            SessionOp::Raw(line) => line.clone(),
        }
    }
}

fuzz_target!(|ops: Vec<SessionOp>| {
    let Ok(dir) = tempfile::tempdir() else {
        return;
    };
    let config = Config::new().with_snapshot_path(dir.path().join("state.json"));
    let mut session = Session::new(&config);

    for op in ops.iter().take(100) {
        let line = op.line();
        if line.len() > 4096 {
            continue;
        }
        if session.execute(&line).quit {
            break;
        }
    }
});
