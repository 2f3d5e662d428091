//! Response shapes, one per endpoint

use super::rules::Rules;

/// `GET /heroes`
pub fn hero_list() -> Rules {
    Rules::only(["id", "name", "super_name"])
}

/// `GET /heroes/{id}`
pub fn hero_detail() -> Rules {
    Rules::exclude(["hero_powers.hero"])
}

/// `GET /powers`
pub fn power_list() -> Rules {
    Rules::only(["id", "name", "description"])
}

/// `GET /powers/{id}`
pub fn power_detail() -> Rules {
    Rules::exclude(["hero_powers"])
}

/// `PATCH /powers/{id}`: the model's own rules only
pub fn power_updated() -> Rules {
    Rules::all()
}

/// `POST /hero_powers`
pub fn hero_power_created() -> Rules {
    Rules::exclude(["hero.hero_powers", "power.hero_powers"])
}
