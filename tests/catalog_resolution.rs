mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::path::PathBuf;

use toolrun::catalog::{ResolveOptions, ToolKind, load_from_path, resolve_invocation};
use toolrun::errors::ToolrunError;
use toolrun::supervisor::ToolCommand;

type TestResult = Result<(), Box<dyn Error>>;

const CATALOG_JSON: &str = r#"
{
  "toolbox": [
    {
      "category": "Forest Line Analysis",
      "tools": [
        {
          "name": "Centerline",
          "tool_api": "centerline",
          "tool_type": "python",
          "info": "Determine seismic line centerlines."
        },
        {
          "name": "Canopy Metrics",
          "tool_api": "canopy_metrics",
          "tool_type": "executable"
        }
      ]
    },
    {
      "category": "Surface Analysis",
      "tools": [
        {
          "name": "Footprint",
          "tool_api": "line_footprint",
          "tool_type": "python"
        }
      ]
    }
  ]
}
"#;

fn write_catalog(dir: &tempfile::TempDir) -> Result<PathBuf, std::io::Error> {
    let path = dir.path().join("tools.json");
    std::fs::write(&path, CATALOG_JSON)?;
    Ok(path)
}

#[test]
fn catalog_loads_and_indexes_tools() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let catalog = load_from_path(write_catalog(&dir)?)?;

    assert_eq!(catalog.tool_count(), 3);

    let categories: Vec<&str> = catalog.by_category().map(|(c, _)| c).collect();
    assert_eq!(categories, vec!["Forest Line Analysis", "Surface Analysis"]);

    // Lookup works by display name and by api id.
    let by_name = catalog.find("Centerline").expect("by name");
    assert_eq!(by_name.tool_api, "centerline");
    assert_eq!(by_name.tool_type, ToolKind::Python);

    let by_api = catalog.find("line_footprint").expect("by api id");
    assert_eq!(by_api.name, "Footprint");

    assert!(catalog.find("NoSuchTool").is_none());

    Ok(())
}

#[test]
fn python_tools_resolve_to_script_invocations() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let catalog = load_from_path(write_catalog(&dir)?)?;

    let args = serde_json::json!({ "in_line": "lines.shp", "threshold": 0.5 });
    let opts = ResolveOptions {
        working_dir: dir.path().to_path_buf(),
        tools_dir: PathBuf::from("tools"),
        max_procs: 8,
        verbose: true,
    };

    let invocation = resolve_invocation(&catalog, "Centerline", &args, &opts)?;
    assert_eq!(invocation.name, "Centerline");
    assert_eq!(invocation.working_dir, dir.path());

    match &invocation.command {
        ToolCommand::Script {
            interpreter,
            script,
            args,
        } => {
            assert_eq!(interpreter, "python");
            assert_eq!(script, &PathBuf::from("tools/centerline.py"));
            assert_eq!(args[0], "-i");
            let blob: serde_json::Value = serde_json::from_str(&args[1])?;
            assert_eq!(blob["in_line"], "lines.shp");
            assert_eq!(&args[2..], ["-p", "8", "-v", "true"]);
        }
        other => panic!("expected a script invocation, got {other:?}"),
    }

    Ok(())
}

#[test]
fn executable_tools_resolve_to_native_invocations() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let catalog = load_from_path(write_catalog(&dir)?)?;

    let args = serde_json::json!({ "in_raster": "chm.tif" });
    let opts = ResolveOptions::default();

    let invocation = resolve_invocation(&catalog, "canopy_metrics", &args, &opts)?;

    match &invocation.command {
        ToolCommand::NativeExecutable { program, args } => {
            assert_eq!(program, &PathBuf::from("tools/canopy_metrics"));
            assert_eq!(args.len(), 1);
            let blob: serde_json::Value = serde_json::from_str(&args[0])?;
            assert_eq!(blob["in_raster"], "chm.tif");
        }
        other => panic!("expected a native invocation, got {other:?}"),
    }

    Ok(())
}

#[test]
fn unknown_tools_are_an_error() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let catalog = load_from_path(write_catalog(&dir)?)?;

    let result = resolve_invocation(
        &catalog,
        "NoSuchTool",
        &serde_json::Value::Null,
        &ResolveOptions::default(),
    );
    assert!(matches!(result, Err(ToolrunError::UnknownTool(name)) if name == "NoSuchTool"));

    Ok(())
}

#[test]
fn missing_catalog_file_is_a_load_error() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let result = load_from_path(dir.path().join("absent.json"));
    assert!(result.is_err());

    Ok(())
}
