use std::path::PathBuf;

use serde_json::json;

use crate::backup;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::store::{RecordsStore, StoreDefaults};

fn handle_backup_export(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(workspace) = state.workspace.clone() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let out_path = req
        .params
        .get("outPath")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(out_path) = out_path else {
        return err(&req.id, "bad_params", "missing outPath", None);
    };

    match backup::export_workspace_bundle(&workspace, &out_path) {
        Ok(summary) => ok(
            &req.id,
            json!({
                "bundleFormat": summary.bundle_format,
                "entryCount": summary.entry_count,
            }),
        ),
        Err(e) => err(&req.id, "backup_export_failed", e.to_string(), None),
    }
}

fn handle_backup_import(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(workspace) = state.workspace.clone() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let in_path = req
        .params
        .get("inPath")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(in_path) = in_path else {
        return err(&req.id, "bad_params", "missing inPath", None);
    };

    let summary = match backup::import_workspace_bundle(&in_path, &workspace) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "backup_import_failed", e.to_string(), None),
    };

    // The documents changed underneath the open store; reload from disk.
    match RecordsStore::open(&workspace, StoreDefaults::default()) {
        Ok(store) => {
            state.store = Some(store);
            ok(
                &req.id,
                json!({ "bundleFormat": summary.bundle_format_detected }),
            )
        }
        Err(e) => err(&req.id, "store_open_failed", format!("{e:?}"), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "backup.export" => Some(handle_backup_export(state, req)),
        "backup.import" => Some(handle_backup_import(state, req)),
        _ => None,
    }
}
