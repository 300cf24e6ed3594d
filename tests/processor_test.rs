use std::cell::RefCell;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use scaffolder::error::Result;
use scaffolder::processor::{Processor, TemplateProcessor, WriteProcessor};
use scaffolder::renderer::MiniJinjaRenderer;
use serde_json::json;
use tempfile::TempDir;

/// Terminal processor capturing what reaches the end of the chain.
#[derive(Default)]
struct Capture {
    files: RefCell<Vec<(PathBuf, String)>>,
}

impl Processor for &Capture {
    fn process_file(&self, path: &Path, content: &mut dyn Read) -> Result<()> {
        let mut buf = String::new();
        content.read_to_string(&mut buf)?;
        self.files.borrow_mut().push((path.to_path_buf(), buf));
        Ok(())
    }
}

#[test]
fn test_template_is_rendered_and_renamed() {
    let engine = MiniJinjaRenderer::new();
    let data = json!({"text": "test!"});
    let capture = Capture::default();
    let processor = TemplateProcessor::new(&engine, &data, Box::new(&capture));

    processor
        .process_file(Path::new("dir/file.txt.tpl"), &mut "This is a {{ text }}\n".as_bytes())
        .unwrap();

    assert_eq!(
        *capture.files.borrow(),
        vec![(PathBuf::from("dir/file.txt"), "This is a test!\n".to_string())]
    );
}

#[test]
fn test_rendering_is_idempotent_on_rendered_output() {
    let engine = MiniJinjaRenderer::new();
    let data = json!({"text": "test!"});
    let capture = Capture::default();
    let processor = TemplateProcessor::new(&engine, &data, Box::new(&capture));

    processor.process_file(Path::new("a.txt.tpl"), &mut "{{ .text }}".as_bytes()).unwrap();
    let first = capture.files.borrow()[0].1.clone();
    assert_eq!(first, "test!");

    processor.process_file(Path::new("b.txt.tpl"), &mut first.as_bytes()).unwrap();
    assert_eq!(capture.files.borrow()[1].1, "test!");
}

#[test]
fn test_leading_dot_directives_are_written_rendered() {
    let out = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let data = json!({"text": "test!"});
    let chain = TemplateProcessor::new(&engine, &data, Box::new(WriteProcessor::new(out.path())));

    chain.process_file(Path::new("file.txt.tpl"), &mut "{{ .text }}".as_bytes()).unwrap();

    assert_eq!(fs::read_to_string(out.path().join("file.txt")).unwrap(), "test!");
}

#[test]
fn test_regular_files_pass_through_untouched() {
    let engine = MiniJinjaRenderer::new();
    let data = json!({});
    let capture = Capture::default();
    let processor = TemplateProcessor::new(&engine, &data, Box::new(&capture));

    processor.process_file(Path::new("raw.txt"), &mut "{{ not rendered".as_bytes()).unwrap();

    assert_eq!(
        *capture.files.borrow(),
        vec![(PathBuf::from("raw.txt"), "{{ not rendered".to_string())]
    );
}

#[test]
fn test_render_failure_does_not_reach_next_processor() {
    let engine = MiniJinjaRenderer::new();
    let capture = Capture::default();

    let data = json!({"text": "test!"});
    let processor = TemplateProcessor::new(&engine, &data, Box::new(&capture));
    assert!(processor.process_file(Path::new("bad.txt.tpl"), &mut "{% if %}".as_bytes()).is_err());

    let data = json!("invalid-data");
    let processor = TemplateProcessor::new(&engine, &data, Box::new(&capture));
    assert!(processor
        .process_file(Path::new("file.txt.tpl"), &mut "{{ text }}".as_bytes())
        .is_err());

    assert!(capture.files.borrow().is_empty());
}

#[test]
fn test_writer_creates_parent_directories() {
    let out = TempDir::new().unwrap();
    let writer = WriteProcessor::new(out.path());

    writer.process_file(Path::new("a/b/c.txt"), &mut "nested".as_bytes()).unwrap();

    assert_eq!(fs::read_to_string(out.path().join("a/b/c.txt")).unwrap(), "nested");
}

#[test]
fn test_writer_truncates_existing_file() {
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("file.txt"), "a much longer previous content").unwrap();
    let writer = WriteProcessor::new(out.path());

    writer.process_file(Path::new("file.txt"), &mut "short".as_bytes()).unwrap();

    assert_eq!(fs::read_to_string(out.path().join("file.txt")).unwrap(), "short");
}

#[test]
fn test_writer_can_read_from_its_own_target() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("same.txt");
    fs::write(&target, "in-place-content\n").unwrap();
    let writer = WriteProcessor::new(out.path());

    let mut source = fs::File::open(&target).unwrap();
    writer.process_file(Path::new("same.txt"), &mut source).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "in-place-content\n");
}

#[test]
fn test_writer_fails_on_invalid_parent() {
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("not-a-dir"), "").unwrap();
    let writer = WriteProcessor::new(out.path());

    let result = writer.process_file(Path::new("not-a-dir/file.txt"), &mut "x".as_bytes());

    assert!(result.is_err());
    assert!(out.path().join("not-a-dir").is_file());
}

#[test]
fn test_full_chain_writes_rendered_output() {
    let out = TempDir::new().unwrap();
    let engine = MiniJinjaRenderer::new();
    let data = json!({"name": "demo"});
    let chain = TemplateProcessor::new(&engine, &data, Box::new(WriteProcessor::new(out.path())));

    chain.process_file(Path::new("README.md.tpl"), &mut "# {{ name }}\n".as_bytes()).unwrap();
    chain.process_file(Path::new("LICENSE"), &mut "MIT\n".as_bytes()).unwrap();

    assert_eq!(fs::read_to_string(out.path().join("README.md")).unwrap(), "# demo\n");
    assert_eq!(fs::read_to_string(out.path().join("LICENSE")).unwrap(), "MIT\n");
    assert!(!out.path().join("README.md.tpl").exists());
}

#[cfg(unix)]
mod permissions {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn mode(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn test_writer_keeps_mode_of_replaced_file() {
        let out = TempDir::new().unwrap();
        let target = out.path().join("gradlew");
        fs::write(&target, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o755)).unwrap();
        let writer = WriteProcessor::new(out.path());

        let mut source = fs::File::open(&target).unwrap();
        writer.process_file(Path::new("gradlew"), &mut source).unwrap();

        assert_eq!(mode(&target), 0o755);
        assert_eq!(fs::read_to_string(&target).unwrap(), "#!/bin/sh\n");
    }

    #[test]
    fn test_writer_copies_mode_from_source_root() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let source_path = src.path().join("bin/mvnw");
        fs::create_dir_all(source_path.parent().unwrap()).unwrap();
        fs::write(&source_path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&source_path, fs::Permissions::from_mode(0o750)).unwrap();
        let writer = WriteProcessor::new(out.path()).with_source_root(src.path());

        let mut source = fs::File::open(&source_path).unwrap();
        writer.process_file(Path::new("bin/mvnw"), &mut source).unwrap();

        assert_eq!(mode(&out.path().join("bin/mvnw")), 0o750);
    }
}
