// src/catalog/fixtures.rs
//! A trimmed copy of the catalog in its current layout.

pub const HEADER: &str =
    "#Name/ASCII       Name/Diacritics   Designation  ID    ID    Con #    WDS_J      mag   bnd HIP    HD     RA(J2000)  Dec(J2000) Date       notes";

pub const SAMPLE: &str = "\
# IAU Catalog of Star Names (IAU-CSN)
# Working Group on Star Names (WGSN)
#
# Designation column lists HR, HD, GJ or HIP identifiers

#Name/ASCII       Name/Diacritics   Designation  ID    ID    Con #    WDS_J      mag   bnd HIP    HD     RA(J2000)  Dec(J2000) Date       notes
#------------------------------------------------------------------------------------------------------------------------------------------
Polaris           Polaris           HR 424       alf   α     UMi Aa   02318+8916  1.97   V  11767   8890  37.954561  89.264109 2016-06-30
Sirius            Sirius            HR 2491      alf   α     CMa A    06451-1643 -1.46   V  32349  48915 101.287155 -16.716116 2016-06-30
Lich              Lich              PSR B1257+12 _     _     Vir _    _           12.2   *      _      _ 195.014953  12.682352 2015-12-15 @
Ananuca           Añañuca           HD 48265     _     _     Pup _    _           8.05   V  31895  48265 100.960590 -48.541890 2019-12-17
La Superba        La Superba        HR 4846      Y     Y     CVn -    -           5.42   V  62223 110914 191.282615  45.440257 2018-06-01
                                    HR 9999      _     _     And _    _           6.00   V      _      _  10.000000  10.000000 2020-01-01

# Notes:
# @ name attached to an exoplanet host star
";

/// The Añañuca row as a byte-aligned revision would lay it out: the two
/// extra UTF-8 bytes in the name eat two padding spaces.
pub const SHIFTED_ROW: &str =
    "Ananuca           Añañuca         HD 48265     _     _     Pup _    _           8.05   V  31895  48265 100.960590 -48.541890 2019-12-17";

pub const ALIGNED_ROW: &str =
    "Ananuca           Añañuca           HD 48265     _     _     Pup _    _           8.05   V  31895  48265 100.960590 -48.541890 2019-12-17";

/// Data lines in [`SAMPLE`], the nameless one included.
pub const SAMPLE_DATA_LINES: usize = 6;
