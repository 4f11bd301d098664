//! Mangle command implementation.
//!
//! Rewrites images in HTML read from stdin, or in a batch of files processed
//! in parallel.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use gaussholder::logger::ProgressLine;
use gaussholder::mangle::Mangled;
use gaussholder::{Mangler, debug, log};

use super::args::MangleArgs;

/// Execute mangle command
pub fn run_mangle(args: &MangleArgs, mangler: &Mangler) -> Result<()> {
    if args.files.is_empty() {
        return mangle_stdin(mangler);
    }

    if args.files.len() > 1 && args.output.is_none() && !args.in_place {
        bail!("multiple files need `--output` or `--in-place`");
    }
    if let Some(dir) = &args.output {
        check_unique_names(&args.files)?;
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create `{}`", dir.display()))?;
    }

    let progress =
        (args.files.len() > 1).then(|| ProgressLine::new(&[("files", args.files.len())]));

    let totals = args
        .files
        .par_iter()
        .map(|file| {
            let mangled = mangle_file(file, args, mangler)?;
            if let Some(progress) = &progress {
                progress.inc("files");
            }
            Ok(mangled)
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(progress) = progress {
        progress.finish();
    }

    let rewritten: usize = totals.iter().map(|(rewritten, _)| rewritten).sum();
    let skipped: usize = totals.iter().map(|(_, skipped)| skipped).sum();
    log!(
        "mangle";
        "rewrote {} images in {} files ({} skipped)",
        rewritten,
        totals.len(),
        skipped
    );

    Ok(())
}

fn mangle_stdin(mangler: &Mangler) -> Result<()> {
    let mut html = String::new();
    io::stdin()
        .read_to_string(&mut html)
        .context("failed to read stdin")?;

    let mangled = mangler.mangle(&html)?;
    debug!("mangle"; "stdin: {} rewritten, {} skipped", mangled.rewritten, mangled.skipped);

    let mut out = io::stdout().lock();
    out.write_all(mangled.html.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Rewrite one file, returning `(rewritten, skipped)`.
fn mangle_file(file: &Path, args: &MangleArgs, mangler: &Mangler) -> Result<(usize, usize)> {
    let html = fs::read_to_string(file)
        .with_context(|| format!("failed to read `{}`", file.display()))?;

    let Mangled {
        html,
        rewritten,
        skipped,
    } = mangler
        .mangle(&html)
        .with_context(|| format!("failed to mangle `{}`", file.display()))?;

    match output_path(file, args) {
        Some(dest) => fs::write(&dest, html)
            .with_context(|| format!("failed to write `{}`", dest.display()))?,
        None => io::stdout().lock().write_all(html.as_bytes())?,
    }

    debug!("mangle"; "{}: {} rewritten, {} skipped", file.display(), rewritten, skipped);
    Ok((rewritten, skipped))
}

/// Files written into one output directory must not share a file name.
fn check_unique_names(files: &[PathBuf]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for file in files {
        let name = file.file_name().unwrap_or(file.as_os_str());
        if !seen.insert(name) {
            bail!(
                "`{}` would overwrite another output with the same name",
                file.display()
            );
        }
    }
    Ok(())
}

/// Destination for a rewritten file; `None` means stdout.
fn output_path(file: &Path, args: &MangleArgs) -> Option<PathBuf> {
    if args.in_place {
        return Some(file.to_path_buf());
    }
    let dir = args.output.as_ref()?;
    Some(match file.file_name() {
        Some(name) => dir.join(name),
        None => dir.join(file),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaussholder::{GaussholderConfig, Library};
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[sizes]
medium = 5

[[attachment]]
id = 42
[attachment.sizes.medium]
url = "http://x/img-medium.jpg"
width = 300
height = 200
placeholder = "AAA"
"#;

    const PAGE: &str =
        r#"<p><img class="wp-image-42 size-medium" src="http://x/img-medium.jpg"></p>"#;

    fn args(files: Vec<PathBuf>, output: Option<PathBuf>, in_place: bool) -> MangleArgs {
        MangleArgs {
            files,
            output,
            in_place,
        }
    }

    #[test]
    fn test_output_path() {
        let file = Path::new("site/posts/a.html");

        let a = args(vec![], None, true);
        assert_eq!(output_path(file, &a), Some(file.to_path_buf()));

        let a = args(vec![], Some(PathBuf::from("out")), false);
        assert_eq!(output_path(file, &a), Some(PathBuf::from("out/a.html")));

        let a = args(vec![], None, false);
        assert_eq!(output_path(file, &a), None);
    }

    #[test]
    fn test_mangle_into_output_dir() {
        let dir = TempDir::new().unwrap();
        let inputs: Vec<_> = ["a.html", "b.html"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, PAGE).unwrap();
                path
            })
            .collect();
        let out = dir.path().join("out");

        let library = Library::from_config(&GaussholderConfig::from_str(CONFIG).unwrap());
        let mangler = Mangler::new(&library, &library);
        run_mangle(&args(inputs.clone(), Some(out.clone()), false), &mangler).unwrap();

        for name in ["a.html", "b.html"] {
            let html = fs::read_to_string(out.join(name)).unwrap();
            assert!(html.contains(r#"data-gaussholder="AAA""#));
        }
        // inputs untouched
        assert_eq!(fs::read_to_string(&inputs[0]).unwrap(), PAGE);
    }

    #[test]
    fn test_mangle_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, PAGE).unwrap();

        let library = Library::from_config(&GaussholderConfig::from_str(CONFIG).unwrap());
        let mangler = Mangler::new(&library, &library);
        run_mangle(&args(vec![path.clone()], None, true), &mangler).unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains(r#"data-gaussholder-size="300,200,5""#));
    }

    #[test]
    fn test_multiple_files_need_destination() {
        let library = Library::default();
        let mangler = Mangler::new(&library, &library);
        let files = vec![PathBuf::from("a.html"), PathBuf::from("b.html")];

        assert!(run_mangle(&args(files, None, false), &mangler).is_err());
    }

    #[test]
    fn test_output_names_must_be_unique() {
        let dir = TempDir::new().unwrap();
        let inputs: Vec<_> = ["a", "b"]
            .iter()
            .map(|sub| {
                let path = dir.path().join(sub).join("x.html");
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(&path, PAGE).unwrap();
                path
            })
            .collect();
        let out = dir.path().join("out");

        let library = Library::from_config(&GaussholderConfig::from_str(CONFIG).unwrap());
        let mangler = Mangler::new(&library, &library);
        let err = run_mangle(&args(inputs, Some(out.clone()), false), &mangler).unwrap_err();

        assert!(err.to_string().contains("x.html"));
        assert!(!out.join("x.html").exists());
    }

    #[test]
    fn test_missing_file() {
        let library = Library::default();
        let mangler = Mangler::new(&library, &library);
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.html");

        let err = run_mangle(&args(vec![missing], None, true), &mangler).unwrap_err();
        assert!(err.to_string().contains("missing.html"));
    }
}
