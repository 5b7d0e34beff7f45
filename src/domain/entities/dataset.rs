//! # UploadedDataset Entity
//!
//! アップロード完了後にサーバーから返されるデータセット

use serde_json::{Map, Value};

static MISSING: Value = Value::Null;

/// 1行分のレコード（列名 → セル値）
pub type Row = Map<String, Value>;

/// 列とその推論された型ラベル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnType {
    pub name: String,
    pub type_label: String,
}

/// アップロードされたデータセット
///
/// 行の列集合のうち、型マップに含まれない列は表示されない。
/// アップロードのたびに丸ごと置き換えられる
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadedDataset {
    rows: Vec<Row>,
    columns: Vec<ColumnType>,
}

impl UploadedDataset {
    /// 新しいデータセットを作成
    ///
    /// # Arguments
    ///
    /// * `rows` - 行レコード
    /// * `columns` - 列名と型ラベル（サーバーの順序を保持）
    pub fn new(rows: Vec<Row>, columns: Vec<ColumnType>) -> Self {
        Self { rows, columns }
    }

    /// サーバーの `data_types` オブジェクトから作成
    ///
    /// 型ラベルが文字列でない場合はJSON表現をそのままラベルとする
    pub fn from_type_map(rows: Vec<Row>, data_types: Map<String, Value>) -> Self {
        let columns = data_types
            .into_iter()
            .map(|(name, label)| ColumnType {
                name,
                type_label: match label {
                    Value::String(s) => s,
                    other => other.to_string(),
                },
            })
            .collect();
        Self::new(rows, columns)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnType] {
        &self.columns
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列名から型ラベルを引く
    pub fn type_of(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.type_label.as_str())
    }

    /// 表示する行を型マップの列順で返す
    ///
    /// 行に値がない列は `Value::Null`、型マップにない列は含まれない
    pub fn visible_rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        self.rows.iter().map(move |row| {
            self.columns
                .iter()
                .map(|column| row.get(&column.name).unwrap_or(&MISSING))
                .collect()
        })
    }
}
