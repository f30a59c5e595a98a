use crate::decoding_blocks::DecodedGraph;
use crate::error::{Error, Result};

const FORMAT: &str = "Matrix Market";

fn number<T: std::str::FromStr>(token: Option<&str>, what: &str) -> Result<T> {
    token
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| Error::decode(FORMAT, format!("invalid {what}")))
}

/// Reads a Matrix Market file as an adjacency matrix. Node `i` is the 0-based row/column `i`.
///
/// `coordinate` files list `row col [value]` entries, `array` files list values column by
/// column: every cell for `general` matrices, the lower triangle for `symmetric` and
/// `hermitian` ones and the strictly lower triangle for `skew-symmetric` ones. Entries equal
/// to zero are not edges. A `general` matrix gives a directed graph, the symmetric kinds an
/// undirected one.
pub fn parse_matrix_market(text: &str) -> Result<DecodedGraph> {
    let mut lines = text.lines().map(str::trim);

    let header = lines
        .next()
        .ok_or_else(|| Error::decode(FORMAT, "empty file"))?
        .to_ascii_lowercase();
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 5 || fields[0] != "%%matrixmarket" || fields[1] != "matrix" {
        return Err(Error::decode(FORMAT, "missing %%MatrixMarket matrix header"));
    }
    let coordinate = match fields[2] {
        "coordinate" => true,
        "array" => false,
        other => return Err(Error::decode(FORMAT, format!("unknown layout '{other}'"))),
    };
    let pattern = fields[3] == "pattern";
    let per_entry = if fields[3] == "complex" { 2 } else { 1 };
    let directed = fields[4] == "general";

    let mut data = lines.filter(|line| !line.is_empty() && !line.starts_with('%'));
    let size_line = data
        .next()
        .ok_or_else(|| Error::decode(FORMAT, "missing size line"))?;
    let mut size = size_line.split_whitespace();
    let rows: usize = number(size.next(), "row count")?;
    let cols: usize = number(size.next(), "column count")?;

    let mut graph = DecodedGraph::new(directed);
    for i in 0..rows.max(cols) {
        graph.add_node(i as i64);
    }

    if coordinate {
        let entries: usize = number(size.next(), "entry count")?;
        for _ in 0..entries {
            let line = data
                .next()
                .ok_or_else(|| Error::decode(FORMAT, "fewer entries than declared"))?;
            let mut parts = line.split_whitespace();
            let row: usize = number(parts.next(), "row index")?;
            let col: usize = number(parts.next(), "column index")?;
            if row == 0 || col == 0 || row > rows || col > cols {
                return Err(Error::decode(FORMAT, format!("entry ({row}, {col}) out of range")));
            }
            let value: Vec<&str> = parts.collect();
            if !pattern && is_zero(&value) {
                continue;
            }
            graph.add_edge((row - 1) as i64, (col - 1) as i64);
        }
    } else {
        let values: Vec<&str> = data.flat_map(str::split_whitespace).collect();
        let cells: Vec<(usize, usize)> = if directed {
            (0..cols).flat_map(|col| (0..rows).map(move |row| (row, col))).collect()
        } else {
            if rows != cols {
                return Err(Error::decode(FORMAT, "symmetric matrix must be square"));
            }
            let skip = usize::from(fields[4] == "skew-symmetric");
            (0..cols)
                .flat_map(|col| (col + skip..rows).map(move |row| (row, col)))
                .collect()
        };
        if values.len() != cells.len() * per_entry {
            return Err(Error::decode(FORMAT, "value count does not match the matrix size"));
        }
        for (&(row, col), value) in cells.iter().zip(values.chunks(per_entry)) {
            if !is_zero(value) {
                graph.add_edge(row as i64, col as i64);
            }
        }
    }

    Ok(graph)
}

/// An entry is zero when it has a value and every part of it parses to 0.
fn is_zero(value: &[&str]) -> bool {
    !value.is_empty() && value.iter().all(|v| v.parse::<f64>().is_ok_and(|v| v == 0.0))
}
