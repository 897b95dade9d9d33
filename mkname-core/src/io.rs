use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Reads a text file and returns its non-blank lines, trimmed.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect())
}

/// Path of the binary cache kept next to a source file.
///
/// The whole file name is kept, so `names.json` and `names.txt` in one
/// directory get separate caches:
/// `data/names.json` → `data/names.json.bin`
pub fn cache_path<P: AsRef<Path>>(source: P) -> io::Result<PathBuf> {
	let source = source.as_ref();
	let file_name = source
		.file_name()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut cache_name = file_name.to_os_string();
	cache_name.push(".bin");
	Ok(source.with_file_name(cache_name))
}

/// Size of a file in bytes, if it can be read.
pub fn file_len<P: AsRef<Path>>(path: P) -> Option<u64> {
	fs::metadata(path).ok().map(|m| m.len())
}

/// Whether `derived` exists and was written no earlier than `source`.
///
/// Missing timestamps count as stale.
pub fn is_up_to_date<P: AsRef<Path>, Q: AsRef<Path>>(derived: P, source: Q) -> bool {
	let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();
	match (modified(derived.as_ref()), modified(source.as_ref())) {
		(Some(derived), Some(source)) => derived >= source,
		_ => false,
	}
}

/// Lists the files in a directory whose extension is one of `extensions`.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if !path.is_file() {
			continue;
		}
		let matches = path
			.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| extensions.contains(&ext));
		if let (true, Some(name)) = (matches, path.file_name()) {
			files.push(name.to_string_lossy().to_string());
		}
	}

	files.sort();
	Ok(files)
}
