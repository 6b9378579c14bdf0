use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};
use crate::ani_error::AniError;

pub const FASTA_EXTENSION: &str = "fasta";

fn is_fasta(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == FASTA_EXTENSION)
}

// Hidden files and folders are skipped, the root itself is always scanned
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/*
Recursively collect every *.fasta file under root, sorted so that runs are repeatable.
Fails with AniError::Discovery if nothing is found, including when root is not a folder.
 */
pub fn find_genomes(root: &Path) -> Result<Vec<PathBuf>, AniError> {
    if !root.is_dir() {
        return Err(AniError::discovery(root));
    }

    let mut genomes = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).into_iter().filter_entry(|e| !is_hidden(e)) {
        let entry = entry.map_err(|e| {
            let context = format!("Failed to scan '{}' for genomes", root.display());
            match e.into_io_error() {
                Some(io_error) => AniError::io(context, io_error),
                None => AniError::io(context, std::io::Error::other("file system loop")),
            }
        })?;
        if entry.file_type().is_file() && is_fasta(entry.path()) {
            genomes.push(entry.into_path());
        }
    }

    if genomes.is_empty() {
        return Err(AniError::discovery(root));
    }
    genomes.sort();
    Ok(genomes)
}

/// Write the genome list skani reads with `-l`, one path per line.
pub fn write_genome_list(genomes: &[PathBuf], list_path: &Path) -> Result<(), AniError> {
    let context = || format!("Failed to write the genome list '{}'", list_path.display());
    let f = File::create(list_path).map_err(|e| AniError::io(context(), e))?;
    let mut buf_writer = BufWriter::new(f);
    for genome in genomes {
        writeln!(buf_writer, "{}", genome.display()).map_err(|e| AniError::io(context(), e))?;
    }
    buf_writer.flush().map_err(|e| AniError::io(context(), e))
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, File};
    use tempdir::TempDir;
    use crate::ani_error::AniError;
    use crate::genome_discovery::{find_genomes, write_genome_list};

    #[test]
    fn test_find_genomes_recursively() {
        let work_dir = TempDir::new("skani_triangle").unwrap();
        let root = work_dir.path();
        create_dir_all(root.join("sample1")).unwrap();
        create_dir_all(root.join("sample2/nested")).unwrap();
        for name in ["b.fasta", "sample1/c.fasta", "sample2/nested/a.fasta", "notes.txt", "sample1/d.fasta.gz", "sample2/e.fa"] {
            File::create(root.join(name)).unwrap();
        }

        let genomes = find_genomes(root).unwrap();
        let relative = genomes.iter()
            .map(|g| g.strip_prefix(root).unwrap().display().to_string())
            .collect::<Vec<String>>();
        assert_eq!(relative, ["b.fasta", "sample1/c.fasta", "sample2/nested/a.fasta"]);
    }

    #[test]
    fn test_skips_hidden_entries() {
        let work_dir = TempDir::new("skani_triangle").unwrap();
        let root = work_dir.path();
        create_dir_all(root.join(".hid")).unwrap();
        create_dir_all(root.join("sample1")).unwrap();
        for name in [".hid/y.fasta", ".x.fasta", "sample1/.z.fasta", "sample1/a.fasta"] {
            File::create(root.join(name)).unwrap();
        }

        let genomes = find_genomes(root).unwrap();
        assert_eq!(genomes, [root.join("sample1/a.fasta")]);
    }

    #[test]
    fn test_missing_root() {
        let work_dir = TempDir::new("skani_triangle").unwrap();
        let missing = work_dir.path().join("not_here");
        assert!(matches!(find_genomes(&missing), Err(AniError::Discovery { .. })));

        let not_a_folder = work_dir.path().join("genome.fasta");
        File::create(&not_a_folder).unwrap();
        assert!(matches!(find_genomes(&not_a_folder), Err(AniError::Discovery { .. })));
    }

    #[test]
    fn test_no_genomes() {
        let work_dir = TempDir::new("skani_triangle").unwrap();
        File::create(work_dir.path().join("readme.md")).unwrap();
        let e = find_genomes(work_dir.path()).unwrap_err();
        assert!(matches!(e, AniError::Discovery { .. }));
        assert!(e.to_string().starts_with("No FASTA files found"));
    }

    #[test]
    fn test_write_genome_list() {
        let work_dir = TempDir::new("skani_triangle").unwrap();
        let genomes = vec![work_dir.path().join("a.fasta"), work_dir.path().join("b.fasta")];
        let list_path = work_dir.path().join("genome_list.txt");
        write_genome_list(&genomes, &list_path).unwrap();

        let content = std::fs::read_to_string(&list_path).unwrap();
        let expected = genomes.iter().map(|g| format!("{}\n", g.display())).collect::<String>();
        assert_eq!(content, expected);
    }
}
