use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    Fr,
    En,
}

impl Language {
    pub fn all() -> [Language; 3] {
        [Language::Ar, Language::Fr, Language::En]
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Ar => "AR",
            Language::Fr => "FR",
            Language::En => "EN",
        }
    }
}

/// Static string table for one language. Referenced everywhere the
/// shell speaks to the user; never formatted at runtime.
pub struct Strings {
    pub welcome: &'static str,
    pub login: &'static str,
    pub signup: &'static str,
    pub ai_prompt: &'static str,
    pub download: &'static str,
    pub settings: &'static str,
    pub theme: &'static str,
    pub greeting: &'static str,
    pub chameleon: &'static str,
    pub image_ready: &'static str,
    pub generation_failed: &'static str,
    pub listen: &'static str,
    pub copy: &'static str,
    pub save_image: &'static str,
    pub thinking: &'static str,
    pub ask_placeholder: &'static str,
    pub imagine_placeholder: &'static str,
    pub dl_title: &'static str,
    pub dl_detect: &'static str,
    pub dl_quality: &'static str,
    pub dl_start: &'static str,
    pub dl_done: &'static str,
    pub dl_cancel: &'static str,
}

static AR: Strings = Strings {
    welcome: "مرحباً بك في تطبيق F NJADI",
    login: "تسجيل الدخول",
    signup: "إنشاء حساب",
    ai_prompt: "كيفاش نقدر نعاونك اليوم؟",
    download: "تحميل الميديا",
    settings: "الإعدادات",
    theme: "المظهر",
    greeting: "مرحبا بكل بتطبيقك الذكي f النجادي من تصميم علي ولد نجادي، شكراً لاختيارك.. نتمنى لك تجربة ممتعة!",
    chameleon: "الحرباء (تلقائي)",
    image_ready: "تفضل، صورتك المصممة خصيصاً لك جاهزة!",
    generation_failed: "حدث خطأ في الاتصال بالسحاب...",
    listen: "استماع",
    copy: "نسخ",
    save_image: "حفظ في الاستوديو",
    thinking: "أسرا تبدع...",
    ask_placeholder: "اسأل روح نجادي...",
    imagine_placeholder: "تخيل شيئاً جميلاً...",
    dl_title: "تحميل المحتوى",
    dl_detect: "تم اكتشاف فيديو/صورة",
    dl_quality: "اختر الجودة",
    dl_start: "بدء التحميل",
    dl_done: "تم الحفظ بنجاح!",
    dl_cancel: "إلغاء",
};

static FR: Strings = Strings {
    welcome: "Bienvenue sur l'application Ali Ould Njadi",
    login: "Connexion",
    signup: "S'inscrire",
    ai_prompt: "Comment puis-je vous aider aujourd'hui ?",
    download: "Télécharger Média",
    settings: "Paramètres",
    theme: "Thème",
    greeting: "Bienvenue sur l'application intelligente F NJADI, conçue par Ali Ould Njadi. Merci de nous avoir choisis. Bonne expérience !",
    chameleon: "Chameleon (Auto)",
    image_ready: "Votre création sur mesure est prête !",
    generation_failed: "Connexion au nuage échouée...",
    listen: "Écouter",
    copy: "Copier",
    save_image: "Enregistrer",
    thinking: "Usra crée...",
    ask_placeholder: "Interrogez l'âme de Njadi...",
    imagine_placeholder: "Imaginez quelque chose de beau...",
    dl_title: "Téléchargeur",
    dl_detect: "Média détecté",
    dl_quality: "Qualité",
    dl_start: "Télécharger",
    dl_done: "Enregistré !",
    dl_cancel: "Annuler",
};

static EN: Strings = Strings {
    welcome: "Welcome to F NJADI App",
    login: "Login",
    signup: "Sign Up",
    ai_prompt: "How can I help you today?",
    download: "Download Media",
    settings: "Settings",
    theme: "Theme",
    greeting: "Welcome to your smart app F NJADI, designed by Ali Ould Njadi. Thank you for choosing us. Have a pleasant experience!",
    chameleon: "Chameleon (Auto)",
    image_ready: "Your custom masterpiece is ready!",
    generation_failed: "Sky-link connection failed...",
    listen: "Listen",
    copy: "Copy",
    save_image: "Save to Gallery",
    thinking: "Usra is creating...",
    ask_placeholder: "Ask the soul of Njadi...",
    imagine_placeholder: "Imagine something beautiful...",
    dl_title: "Downloader",
    dl_detect: "Media Detected",
    dl_quality: "Select Quality",
    dl_start: "Download Now",
    dl_done: "Saved to Gallery!",
    dl_cancel: "Cancel",
};

pub fn strings(lang: Language) -> &'static Strings {
    match lang {
        Language::Ar => &AR,
        Language::Fr => &FR,
        Language::En => &EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_language_resolves_its_own_table() {
        let greetings: Vec<_> = Language::all()
            .iter()
            .map(|&l| strings(l).greeting)
            .collect();
        assert_ne!(greetings[0], greetings[1]);
        assert_ne!(greetings[1], greetings[2]);
    }

    #[test]
    fn failure_messages_are_localized() {
        assert_eq!(strings(Language::En).generation_failed, "Sky-link connection failed...");
        assert_ne!(
            strings(Language::Ar).generation_failed,
            strings(Language::En).generation_failed
        );
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(Language::Ar.label(), "AR");
        assert_eq!(Language::all().len(), 3);
    }
}
