/*!
 * Common test utilities for the itf-translator test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Dictionary rows used across the test suite (german;french;italian)
pub const TEST_DICTIONARY: &str = "\
# Test dictionary for DM01AVCH
# german;french;italian

DM01AVCH24D;DM01AVCH24F;DM01AVCH24I
Bodenbedeckung;Couverture_du_sol;Copertura_del_suolo
BoFlaeche;Surface_CS;Superficie_CS
Objektname;Nom;Nome
ObjektnamePos;PosNom;PosNome
Linienobjekt;Element_lineaire;Elemento_lineare
Linienelement;Element_lineaire;Elemento_lineare
Einzelobjekte;Objets_divers;Oggetti_singoli
Flaechenelement;Element_surfacique;Elemento_superficiale
Bords_de_plan;Bords_de_plan;Margine_del_piano
Planrahmen;Bords_de_plan;Margine_del_piano
";

/// A small transfer file in German
pub const TEST_ITF_DE: &str = "\
SCNT
Testdaten Gemeinde Mörel
////
MTID INTERLIS1
MODL DM01AVCH24D
EMOD
ETOP
TOPI Bodenbedeckung
TABL BoFlaeche
OBJE 1 Gebaeude
ETAB
TABL Objektname
OBJE 2 Objekt Objektname
ETAB
TABL ObjektnamePos
OBJE 3 600000.000 200000.000
ETAB
ETOP
TOPI Einzelobjekte
TABL Linienobjekt
OBJE 4 Linienobjekt
ETAB
ETOP
EMOD
ENDE
";

/// Routes engine logs to the test harness, honouring RUST_LOG
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a test file with raw bytes
pub fn create_test_bytes(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates the test dictionary in the specified directory
pub fn create_test_dictionary(dir: &Path) -> Result<PathBuf> {
    create_test_file(dir, "translations.txt", TEST_DICTIONARY)
}

/// Encodes text as ISO-8859-1 the way surveying software writes ITF files
pub fn latin1(text: &str) -> Vec<u8> {
    text.chars().map(|c| u8::try_from(u32::from(c)).expect("latin-1 test text")).collect()
}

/// Creates the German test transfer file, encoded as ISO-8859-1
pub fn create_test_itf(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_bytes(dir, filename, &latin1(TEST_ITF_DE))
}
