//! Server-rendered pages: the public menu and the admin back office.
//!
//! Every value that can originate from user input goes through [`escape`].

use rust_decimal::Decimal;

use pizzeria_domain::order::OrderStatus;
use pizzeria_domain::pricing;

use crate::domain::types::{
    DeliveryPerson, DiscountCode, ExtraItem, Ingredient, OrderSummary, Pizza, UserSummary,
};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;margin-bottom:1rem}\
th,td{border:1px solid #ccc;padding:.3rem .6rem;text-align:left}\
nav a{margin-right:1rem}\
section{margin-top:2rem}\
form.inline{display:inline}\
.error{color:#b00}";

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", pricing::to_cents(amount))
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title)
    )
}

fn id_button(action: &str, id: i32, label: &str) -> String {
    format!(
        "<form class=\"inline\" method=\"post\" action=\"{action}\">\
         <input type=\"hidden\" name=\"id\" value=\"{id}\"><button>{label}</button></form>"
    )
}

// ── Menu ─────────────────────────────────────────────────────────────────────

/// The public menu. `pizzas` are rendered in the order given.
pub fn menu_page(pizzas: &[Pizza]) -> String {
    let mut body = String::from("<h1>Menu</h1>\n");
    if pizzas.is_empty() {
        body.push_str("<p>No pizzas on the menu yet.</p>\n");
        return page("Menu", &body);
    }
    body.push_str(
        "<table>\n<tr><th>Pizza</th><th>Ingredients</th><th>Price</th><th>Diet</th></tr>\n",
    );
    for pizza in pizzas {
        let ingredients: Vec<String> = pizza.ingredients.iter().map(|i| escape(&i.name)).collect();
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&pizza.name),
            ingredients.join(", "),
            money(pizza.price()),
            pizza.diet().label(),
        ));
    }
    body.push_str("</table>\n");
    page("Menu", &body)
}

// ── Admin ────────────────────────────────────────────────────────────────────

pub fn admin_login_page(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Admin login</h1>\n");
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }
    body.push_str(
        "<form method=\"get\" action=\"/admin\">\n\
         <label>Username <input name=\"username\" required></label>\n\
         <label>Password <input name=\"password\" type=\"password\" required></label>\n\
         <button>Log in</button>\n</form>\n",
    );
    page("Admin login", &body)
}

/// Everything the dashboard tabs display.
pub struct AdminDashboard<'a> {
    pub admin: &'a str,
    pub users: &'a [UserSummary],
    pub orders: &'a [OrderSummary],
    pub delivery_persons: &'a [DeliveryPerson],
    pub pizzas: &'a [Pizza],
    pub ingredients: &'a [Ingredient],
    pub extra_items: &'a [ExtraItem],
    pub discount_codes: &'a [DiscountCode],
}

pub fn admin_dashboard(data: &AdminDashboard<'_>) -> String {
    let mut body = format!(
        "<h1>Admin</h1>\n<p>Logged in as {}. \
         <form class=\"inline\" method=\"post\" action=\"/admin/logout\"><button>Log out</button></form></p>\n\
         <nav><a href=\"#users\">Users</a><a href=\"#orders\">Orders</a>\
         <a href=\"#delivery\">Delivery persons</a><a href=\"#pizzas\">Pizzas</a>\
         <a href=\"#ingredients\">Ingredients</a><a href=\"#extra-items\">Extra items</a>\
         <a href=\"#discounts\">Discount codes</a></nav>\n",
        escape(data.admin)
    );
    body.push_str(&users_section(data.users));
    body.push_str(&orders_section(data.orders, data.delivery_persons));
    body.push_str(&delivery_section(data.delivery_persons));
    body.push_str(&pizzas_section(data.pizzas));
    body.push_str(&ingredients_section(data.ingredients));
    body.push_str(&extra_items_section(data.extra_items));
    body.push_str(&discounts_section(data.discount_codes));
    page("Admin", &body)
}

fn users_section(users: &[UserSummary]) -> String {
    let mut out = String::from(
        "<section id=\"users\">\n<h2>Users</h2>\n<table>\n\
         <tr><th>ID</th><th>Username</th><th>Role</th><th>Name</th><th>Details</th><th></th></tr>\n",
    );
    for user in users {
        let (name, details) = match (&user.customer, &user.delivery_person) {
            (Some(c), _) => (
                escape(&c.name),
                format!("{}, {}", escape(&c.address), escape(&c.postal_code)),
            ),
            (None, Some(d)) => (escape(&d.name), escape(&d.vehicle_type)),
            (None, None) => (String::new(), String::new()),
        };
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{name}</td><td>{details}</td><td>{}</td></tr>\n",
            user.id,
            escape(&user.username),
            user.role,
            id_button("/admin/users/delete", user.id, "Delete"),
        ));
    }
    out.push_str(
        "</table>\n<h3>Create user</h3>\n\
         <form method=\"post\" action=\"/admin/users/create\">\n\
         <select name=\"role\"><option value=\"customer\">Customer</option>\
         <option value=\"delivery_person\">Delivery person</option>\
         <option value=\"admin\">Admin</option></select>\n\
         <input name=\"username\" placeholder=\"Username\" required>\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\n\
         <input name=\"name\" placeholder=\"Name\">\n\
         <input name=\"gender\" placeholder=\"Gender\">\n\
         <input name=\"birth_date\" placeholder=\"YYYY-MM-DD\">\n\
         <label><input name=\"no_birth_date\" type=\"checkbox\"> No birth date</label>\n\
         <input name=\"address\" placeholder=\"Address\">\n\
         <input name=\"postal_code\" placeholder=\"Postcode\">\n\
         <input name=\"vehicle_type\" placeholder=\"Vehicle (bike)\">\n\
         <button>Create</button>\n</form>\n</section>\n",
    );
    out
}

fn orders_section(orders: &[OrderSummary], persons: &[DeliveryPerson]) -> String {
    let mut out = String::from(
        "<section id=\"orders\">\n<h2>Orders</h2>\n<table>\n\
         <tr><th>ID</th><th>Customer</th><th>Placed</th><th>Address</th><th>Discount</th>\
         <th>Status</th><th>Delivery</th><th></th></tr>\n",
    );
    for summary in orders {
        let order = &summary.order;
        let discount = match (&summary.discount_code, summary.discount_percentage) {
            (Some(code), Some(pct)) => format!("{} ({pct}%)", escape(code)),
            _ => String::new(),
        };

        let mut status_options = String::new();
        for status in OrderStatus::ALL {
            let selected = if status == order.status { " selected" } else { "" };
            status_options.push_str(&format!("<option{selected}>{status}</option>"));
        }
        let mut person_options = String::from("<option value=\"\">Unassigned</option>");
        for person in persons {
            let selected = if order.delivery_person_id == Some(person.id) {
                " selected"
            } else {
                ""
            };
            person_options.push_str(&format!(
                "<option value=\"{}\"{selected}>{}</option>",
                person.id,
                escape(&person.name)
            ));
        }

        out.push_str(&format!(
            "<tr><td>{id}</td><td>{customer}</td><td>{placed}</td><td>{address}, {postal}</td><td>{discount}</td>\
             <td><form class=\"inline\" method=\"post\" action=\"/admin/orders/update-status\">\
             <input type=\"hidden\" name=\"id\" value=\"{id}\"><select name=\"status\">{status_options}</select>\
             <button>Set</button></form></td>\
             <td><form class=\"inline\" method=\"post\" action=\"/admin/orders/assign-delivery\">\
             <input type=\"hidden\" name=\"id\" value=\"{id}\"><select name=\"delivery_person_id\">{person_options}</select>\
             <button>Assign</button></form></td><td>{delete}</td></tr>\n",
            id = order.id,
            customer = escape(&summary.customer_name),
            placed = order.created_at.format("%Y-%m-%d %H:%M"),
            address = escape(&order.delivery_address),
            postal = escape(&order.postal_code),
            delete = id_button("/admin/orders/delete", order.id, "Delete"),
        ));
    }
    out.push_str("</table>\n</section>\n");
    out
}

fn delivery_section(persons: &[DeliveryPerson]) -> String {
    let mut out = String::from(
        "<section id=\"delivery\">\n<h2>Delivery persons</h2>\n<table>\n\
         <tr><th>ID</th><th>Name</th><th>Vehicle</th><th>Unavailable until</th><th></th></tr>\n",
    );
    for person in persons {
        let until = person
            .unavailable_until
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{until}</td><td>{}</td></tr>\n",
            person.id,
            escape(&person.name),
            escape(&person.vehicle_type),
            id_button("/admin/delivery/delete", person.id, "Delete"),
        ));
    }
    out.push_str("</table>\n</section>\n");
    out
}

fn pizzas_section(pizzas: &[Pizza]) -> String {
    let mut out = String::from(
        "<section id=\"pizzas\">\n<h2>Pizzas</h2>\n<table>\n\
         <tr><th>ID</th><th>Name</th><th>Ingredients</th><th>Price</th><th>Diet</th><th></th></tr>\n",
    );
    for pizza in pizzas {
        let ingredients: Vec<String> = pizza.ingredients.iter().map(|i| escape(&i.name)).collect();
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            pizza.id,
            escape(&pizza.name),
            ingredients.join(", "),
            money(pizza.price()),
            pizza.diet().label(),
            id_button("/admin/pizza/delete", pizza.id, "Delete"),
        ));
    }
    out.push_str(
        "</table>\n<h3>Create pizza</h3>\n\
         <form method=\"post\" action=\"/admin/pizza/create\">\n\
         <input name=\"name\" placeholder=\"Name\" required>\n\
         <input name=\"ingredients\" placeholder=\"Ingredient names, comma separated\" required>\n\
         <button>Create</button>\n</form>\n</section>\n",
    );
    out
}

fn ingredients_section(ingredients: &[Ingredient]) -> String {
    let mut out = String::from(
        "<section id=\"ingredients\">\n<h2>Ingredients</h2>\n<table>\n\
         <tr><th>ID</th><th>Name</th><th>Cost (cents)</th><th>Meat</th><th>Animal products</th><th></th></tr>\n",
    );
    for ingredient in ingredients {
        let cents = (ingredient.cost * Decimal::ONE_HUNDRED).round();
        let checked = |flag: bool| if flag { " checked" } else { "" };
        out.push_str(&format!(
            "<tr><td>{id}</td>\
             <td><input form=\"ingredient-{id}\" name=\"name\" value=\"{name}\"></td>\
             <td><input form=\"ingredient-{id}\" name=\"cost\" type=\"number\" min=\"0\" value=\"{cents}\"></td>\
             <td><input form=\"ingredient-{id}\" name=\"has_meat\" type=\"checkbox\"{meat}></td>\
             <td><input form=\"ingredient-{id}\" name=\"has_animal\" type=\"checkbox\"{animal}></td>\
             <td><form id=\"ingredient-{id}\" class=\"inline\" method=\"post\" action=\"/admin/ingredient/update\">\
             <input type=\"hidden\" name=\"id\" value=\"{id}\"><button>Save</button></form>{delete}</td></tr>\n",
            id = ingredient.id,
            name = escape(&ingredient.name),
            meat = checked(ingredient.has_meat),
            animal = checked(ingredient.has_animal_products),
            delete = id_button("/admin/ingredient/delete", ingredient.id, "Delete"),
        ));
    }
    out.push_str(
        "</table>\n<h3>Create ingredient</h3>\n\
         <form method=\"post\" action=\"/admin/ingredient/create\">\n\
         <input name=\"name\" placeholder=\"Name\" required>\n\
         <input name=\"cost\" type=\"number\" min=\"0\" placeholder=\"Cost in cents\" required>\n\
         <label><input name=\"has_meat\" type=\"checkbox\"> Meat</label>\n\
         <label><input name=\"has_animal\" type=\"checkbox\"> Animal products</label>\n\
         <button>Create</button>\n</form>\n</section>\n",
    );
    out
}

fn extra_items_section(items: &[ExtraItem]) -> String {
    let mut out = String::from(
        "<section id=\"extra-items\">\n<h2>Extra items</h2>\n<table>\n\
         <tr><th>ID</th><th>Name</th><th>Category</th><th>Price</th><th></th></tr>\n",
    );
    for item in items {
        out.push_str(&format!(
            "<tr><td>{id}</td>\
             <td><input form=\"extra-{id}\" name=\"name\" value=\"{name}\"></td>\
             <td><input form=\"extra-{id}\" name=\"category\" value=\"{category}\"></td>\
             <td><input form=\"extra-{id}\" name=\"price\" value=\"{price}\"></td>\
             <td><form id=\"extra-{id}\" class=\"inline\" method=\"post\" action=\"/admin/extra-items/update\">\
             <input type=\"hidden\" name=\"id\" value=\"{id}\"><button>Save</button></form>{delete}</td></tr>\n",
            id = item.id,
            name = escape(&item.name),
            category = item.category,
            price = money(item.price),
            delete = id_button("/admin/extra-items/delete", item.id, "Delete"),
        ));
    }
    out.push_str(
        "</table>\n<h3>Create extra item</h3>\n\
         <form method=\"post\" action=\"/admin/extra-items/create\">\n\
         <input name=\"name\" placeholder=\"Name\" required>\n\
         <select name=\"category\"><option>dessert</option><option>drink</option></select>\n\
         <input name=\"price\" placeholder=\"2.50\" required>\n\
         <button>Create</button>\n</form>\n</section>\n",
    );
    out
}

fn discounts_section(codes: &[DiscountCode]) -> String {
    let mut out = String::from(
        "<section id=\"discounts\">\n<h2>Discount codes</h2>\n<table>\n\
         <tr><th>ID</th><th>Code</th><th>Percentage</th><th>Active</th><th></th></tr>\n",
    );
    for code in codes {
        out.push_str(&format!(
            "<tr><td>{id}</td><td>{code}</td>\
             <td><input form=\"discount-{id}\" name=\"percentage\" type=\"number\" min=\"1\" max=\"100\" value=\"{pct}\"></td>\
             <td><input form=\"discount-{id}\" name=\"is_active\" type=\"checkbox\"{active}></td>\
             <td><form id=\"discount-{id}\" class=\"inline\" method=\"post\" action=\"/admin/discount/update\">\
             <input type=\"hidden\" name=\"id\" value=\"{id}\"><button>Save</button></form>{delete}</td></tr>\n",
            id = code.id,
            code = escape(&code.code),
            pct = code.discount_percentage,
            active = if code.is_active { " checked" } else { "" },
            delete = id_button("/admin/discount/delete", code.id, "Delete"),
        ));
    }
    out.push_str(
        "</table>\n<h3>Create discount code</h3>\n\
         <form method=\"post\" action=\"/admin/discount/create\">\n\
         <input name=\"code\" placeholder=\"Code\" required>\n\
         <input name=\"percentage\" type=\"number\" min=\"1\" max=\"100\" required>\n\
         <button>Create</button>\n</form>\n</section>\n",
    );
    out
}
