//! Localized reply strings.
//!
//! Plain text only; the transport owns any rendering. Russian is the
//! default language for users who never picked one.

use domains::models::{Lang, TicketCategory};

pub fn welcome(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "👋 Здравствуйте!\nЭто сервис приёма жалоб и предложений.\nВыберите тип обращения и отправьте текст.",
        Lang::Uz => "👋 Assalomu alaykum!\nBu shikoyat va takliflarni qabul qilish xizmati.\nToifani tanlab matn yuboring.",
    }
}

pub fn choose_lang() -> &'static str {
    "Iltimos, tilni tanlang / Пожалуйста, выберите язык: /lang ru | /lang uz"
}

pub fn menu(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "Выберите действие: /complaint — жалоба, /suggestion — предложение, /my — мои обращения, /about — о сервисе",
        Lang::Uz => "Amalni tanlang: /complaint — shikoyat, /suggestion — taklif, /my — mening murojaatlarim, /about — xizmat haqida",
    }
}

pub fn about(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "ℹ️ Сервис приёма жалоб и предложений.\nКаждое обращение получает номер и отправляется на рассмотрение. Пожалуйста, не отправляйте ссылки.",
        Lang::Uz => "ℹ️ Shikoyat va takliflarni qabul qilish xizmati. Har bir murojaatga raqam beriladi va ko‘rib chiqiladi.",
    }
}

pub fn category_name(lang: Lang, category: TicketCategory) -> &'static str {
    match (lang, category) {
        (Lang::Ru, TicketCategory::Complaint) => "жалоба",
        (Lang::Ru, TicketCategory::Suggestion) => "предложение",
        (Lang::Uz, TicketCategory::Complaint) => "shikoyat",
        (Lang::Uz, TicketCategory::Suggestion) => "taklif",
    }
}

pub fn category_set(lang: Lang, category: TicketCategory) -> String {
    let name = category_name(lang, category);
    match lang {
        Lang::Ru => format!("Категория установлена: {name}.\nТеперь отправьте текст или медиа."),
        Lang::Uz => format!("Toifa o‘rnatildi: {name}.\nEndi matn yoki media yuboring."),
    }
}

pub fn select_category(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "Выберите тип обращения: /complaint или /suggestion",
        Lang::Uz => "Murojaat turini tanlang: /complaint yoki /suggestion",
    }
}

pub fn saved(lang: Lang, ticket_no: &str) -> String {
    match lang {
        Lang::Ru => format!("✅ Обращение сохранено. Номер: {ticket_no}\nСпасибо!"),
        Lang::Uz => format!("✅ Murojaat saqlandi. Raqam: {ticket_no}\nRahmat!"),
    }
}

pub fn blocked(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "⛔ Вы заблокированы. Обращения от вас не принимаются.",
        Lang::Uz => "⛔ Siz bloklangansiz. Murojaatlar qabul qilinmaydi.",
    }
}

pub fn link_block(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "🚫 Ссылки и теги запрещены. Удалите ссылку и отправьте текст повторно.",
        Lang::Uz => "🚫 Havolalar taqiqlangan. Havolasiz yuboring.",
    }
}

pub fn rate_limited(lang: Lang, secs: u64) -> String {
    match lang {
        Lang::Ru => format!("⏳ Пожалуйста, подождите {secs} сек. между отправками."),
        Lang::Uz => format!("⏳ Yuborishlar orasida {secs} soniya kuting."),
    }
}

pub fn try_later(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "⚠️ Сервис временно недоступен. Попробуйте позже.",
        Lang::Uz => "⚠️ Xizmat vaqtincha ishlamayapti. Keyinroq urinib ko‘ring.",
    }
}

pub fn my_empty(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "У вас пока нет обращений.",
        Lang::Uz => "Hali murojaatlaringiz yo‘q.",
    }
}

pub fn my_list_title(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "📜 Ваши обращения:",
        Lang::Uz => "📜 Sizning murojaatlaringiz:",
    }
}

pub fn block_usage(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "Использование: /block <user_id> [причина]",
        Lang::Uz => "Foydalanish: /block <user_id> [sabab]",
    }
}

pub fn unblock_usage(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "Использование: /unblock <user_id>",
        Lang::Uz => "Foydalanish: /unblock <user_id>",
    }
}

pub fn cant_block_admin(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "Нельзя блокировать администратора.",
        Lang::Uz => "Administratorni bloklab bo‘lmaydi.",
    }
}

pub fn blocked_ok(lang: Lang, user_id: i64, reason: Option<&str>) -> String {
    let reason = reason.unwrap_or("-");
    match lang {
        Lang::Ru => format!("Пользователь {user_id} заблокирован. Причина: {reason}"),
        Lang::Uz => format!("Foydalanuvchi {user_id} bloklandi. Sabab: {reason}"),
    }
}

pub fn unblocked_ok(lang: Lang, user_id: i64) -> String {
    match lang {
        Lang::Ru => format!("Пользователь {user_id} разблокирован."),
        Lang::Uz => format!("Foydalanuvchi {user_id} blokdan chiqarildi."),
    }
}

pub fn status_usage(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "Использование: /setstatus <TICKET> <new|in_progress|done>",
        Lang::Uz => "Foydalanish: /setstatus <TICKET> <new|in_progress|done>",
    }
}

pub fn status_ok(lang: Lang, ticket_no: &str, status: &str) -> String {
    match lang {
        Lang::Ru => format!("Статус заявки {ticket_no} установлен: {status}."),
        Lang::Uz => format!("Ariza holati {ticket_no}: {status} ga o‘rnatildi."),
    }
}

pub fn ticket_not_found(lang: Lang, ticket_no: &str) -> String {
    match lang {
        Lang::Ru => format!("Заявка {ticket_no} не найдена."),
        Lang::Uz => format!("{ticket_no} arizasi topilmadi."),
    }
}

pub fn blocked_empty(lang: Lang) -> &'static str {
    match lang {
        Lang::Ru => "Список блокировок пуст.",
        Lang::Uz => "Bloklanganlar ro‘yxati bo‘sh.",
    }
}

pub fn blocked_list_title(lang: Lang, page: i64) -> String {
    match lang {
        Lang::Ru => format!("⛔ Заблокированные (стр. {page}):"),
        Lang::Uz => format!("⛔ Bloklanganlar (sah. {page}):"),
    }
}
