//! Canned answers used when no chat model is reachable.

pub const HOSPITAL: &str = "নিকটস্থ হাসপাতাল খুঁজতে স্বাস্থ্য সেবা কেন্দ্র মেনুতে যান। সেখানে আপনার এলাকার হাসপাতালের তথ্য পাবেন।";
pub const VACCINE: &str =
    "শিশুর টিকার জন্য মা ও শিশু স্বাস্থ্য মেনুতে যান। সেখানে টিকার তালিকা ও তারিখ পাবেন।";
pub const FEVER: &str = "জ্বর থাকলে বিশ্রাম নিন এবং প্রচুর পানি পান করুন। জ্বর ৩ দিনের বেশি থাকলে ডাক্তার দেখান। লক্ষণ পরীক্ষা মেনুতে বিস্তারিত জানুন।";
pub const DIARRHEA: &str = "ডায়রিয়া হলে ওআরএস খান। ১ লিটার পানিতে ৬ চামচ চিনি ও আধা চামচ লবণ মিশিয়ে বানাতে পারেন। রক্ত গেলে হাসপাতালে যান।";
pub const HELP: &str = "সাহায্য চাইতে সাহায্য চাই মেনুতে যান। বেনামে আপনার সমস্যা জানাতে পারবেন।";
pub const MENTAL: &str =
    "মানসিক স্বাস্থ্য খুবই গুরুত্বপূর্ণ। মানসিক স্বাস্থ্য মেনুতে পরামর্শ ও সাহায্য পাবেন।";
pub const PREGNANCY: &str = "গর্ভবতী মায়েদের জন্য মা ও শিশু স্বাস্থ্য মেনুতে বিশেষ পরামর্শ রয়েছে। নিয়মিত ডাক্তার দেখান এবং পুষ্টিকর খাবার খান।";
pub const DEFAULT: &str = "আপনি জানতে চাইতে পারেন: হাসপাতাল কোথায়, টিকা কখন নিতে হবে, জ্বর হলে কি করব, ডায়রিয়া হলে কি করব, মানসিক স্বাস্থ্য সম্পর্কে।";

/// Keywords checked in order; the first entry with a matching keyword wins.
const TABLE: [(&[&str], &str); 7] = [
    (&["হাসপাতাল", "হাস পাতাল"], HOSPITAL),
    (&["টিকা"], VACCINE),
    (&["জ্বর"], FEVER),
    (&["ডায়রিয়া"], DIARRHEA),
    (&["সাহায্য"], HELP),
    (&["মানসিক"], MENTAL),
    (&["গর্ভবতী", "গর্ভাবস্থা"], PREGNANCY),
];

pub fn fallback_response(message: &str) -> &'static str {
    let message = message.to_lowercase();
    TABLE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| message.contains(keyword)))
        .map_or(DEFAULT, |(_, answer)| answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_select_their_answer() {
        assert_eq!(fallback_response("নিকটস্থ হাসপাতাল কোথায়?"), HOSPITAL);
        assert_eq!(fallback_response("হাস পাতাল"), HOSPITAL);
        assert_eq!(fallback_response("টিকা কখন দিতে হবে"), VACCINE);
        assert_eq!(fallback_response("জ্বর হলে কি করতে হবে?"), FEVER);
        assert_eq!(fallback_response("গর্ভাবস্থায় কি খাব?"), PREGNANCY);
    }

    #[test]
    fn earlier_entries_win() {
        assert_eq!(fallback_response("জ্বর হলে কোন হাসপাতাল যাব?"), HOSPITAL);
        assert_eq!(fallback_response("মানসিক সাহায্য দরকার"), HELP);
    }

    #[test]
    fn unmatched_message_gets_the_menu() {
        assert_eq!(fallback_response("hello"), DEFAULT);
        assert_eq!(fallback_response(""), DEFAULT);
    }
}
