//! 评教页面（Element UI）的结构选择器

/// 表格行
pub const TABLE_ROW: &str = "tr.el-table__row";
/// 行内状态单元格
pub const ROW_STATUS: &str = ".wpj";
/// 行内教师姓名单元格
pub const ROW_NAME: &str = ".el-table_1_column_3 .cell";
/// 行内评价按钮
pub const ROW_ACTION: &str = ".btn_theme";

/// 评价弹窗
pub const DIALOG: &str = ".el-dialog__wrapper.whole";
/// 弹窗内的输入框
pub const DIALOG_INPUT: &str = ".el-dialog__wrapper.whole input";
/// 评分项所在的列表项
pub const RATING_ITEM: &str = "li.clearfix";
/// 评分项标签
pub const RATING_LABEL: &str = "span.btbs";
/// 提交按钮
pub const SUBMIT_BUTTON: &str = ".el-dialog__header button.theme_color.btn";
/// 标题栏关闭按钮
pub const CLOSE_BUTTON: &str = ".el-dialog__headerbtn";
