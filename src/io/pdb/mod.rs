pub mod reader;
pub mod writer;

#[cfg(test)]
pub(crate) mod fixtures {
    /// Four-residue peptide (MET-ALA-CYS-GLY) on one chain, with records the reader must skip.
    pub const PEPTIDE: &str = "\
REMARK   1 SMALL TEST PEPTIDE
CRYST1   50.000   50.000   50.000  90.00  90.00  90.00 P 1           1
ATOM      1  N   MET A   1     -11.938  30.846  25.826  1.00 20.00           N
ATOM      2  CA  MET A   1      -4.696   9.726   6.969  1.00 20.00           C
ATOM      3  C   MET A   1      19.096  27.323 -14.368  1.00 20.00           C
ATOM      4  O   MET A   1     -18.299  30.146   5.966  1.00 20.00           O
ATOM      5  CB  MET A   1      25.737 -19.874   6.723  1.00 20.00           C
ATOM      6  SD  MET A   1      23.292  -6.274  36.716  1.00 20.00           S
ATOM      7  N   ALA A   2      34.086 -18.165 -18.473  1.00 20.00           N
ATOM      8  CA  ALA A   2      12.485  36.349   2.872  1.00 20.00           C
ATOM      9  C   ALA A   2      -7.004   5.327 -18.258  1.00 20.00           C
ATOM     10  O   ALA A   2      -6.699   6.273   9.749  1.00 20.00           O
ATOM     11  CB  ALA A   2      -6.015  -6.148  -6.873  1.00 20.00           C
ATOM     12  N   CYS A   3       7.576  -2.613 -18.711  1.00 20.00           N
ATOM     13  CA  CYS A   3      30.255  13.387  18.538  1.00 20.00           C
ATOM     14  C   CYS A   3      -8.846  39.553  31.597  1.00 20.00           C
ATOM     15  O   CYS A   3     -12.747  -0.038  23.289  1.00 20.00           O
ATOM     16  CB  CYS A   3      22.672  36.186   5.326  1.00 20.00           C
ATOM     17  SG  CYS A   3      29.802  20.218  -1.798  1.00 20.00           S
ATOM     18  N   GLY A   4      15.255  32.949  30.772  1.00 20.00           N
ATOM     19  CA  GLY A   4      10.317  15.340 -17.928  1.00 20.00           C
ATOM     20  C   GLY A   4      -5.436  27.844   4.859  1.00 20.00           C
ATOM     21  O   GLY A   4      -9.620  12.928  22.182  1.00 20.00           O
TER      22      GLY A   4
HETATM   23  O   HOH A 101       1.000   2.000   3.000  1.00 30.00           O
END
ATOM     99  N   LYS A   5       0.000   0.000   0.000  1.00 20.00           N
";
}
