//! Localized user-facing messages

use omran_config::Locale;

/// Messages shown when a domain action could not be completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// No plugin handled a sale
    SaleNotHandled,
    /// No plugin handled an inventory update
    InventoryNotHandled,
    /// No plugin handled a report request
    ReportNotHandled,
}

impl Message {
    /// Message text in the given locale
    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Message::SaleNotHandled, Locale::Ar) => "فشل في معالجة عملية البيع",
            (Message::SaleNotHandled, Locale::En) => "Failed to process sale",
            (Message::InventoryNotHandled, Locale::Ar) => "فشل في تحديث المخزون",
            (Message::InventoryNotHandled, Locale::En) => "Failed to update inventory",
            (Message::ReportNotHandled, Locale::Ar) => "فشل في إنشاء التقرير",
            (Message::ReportNotHandled, Locale::En) => "Failed to generate report",
        }
    }
}
