pub mod cmd {
    // Account
    pub const LOGIN: &str = "monlivre login --email <EMAIL> --password <PASSWORD>";
    pub const REGISTER: &str =
        "monlivre register --name <NAME> --email <EMAIL> --password <PW> --confirm-password <PW>";
    pub const PROFILE: &str = "monlivre profile";

    // Loans
    pub const LOANS_LIST: &str = "monlivre loans list";
    pub const LOANS_RETURN: &str = "monlivre loans return <ID>";

    // Catalog
    pub const CATALOG_LIST: &str = "monlivre catalog list";
    pub const CATALOG_BORROW: &str = "monlivre catalog borrow <ID> --return-date <YYYY-MM-DD>";

    // Admin
    pub const ADMIN_BOOKS_ADD: &str =
        "monlivre admin books add --title <T> --author <A> --genre <G> --isbn <ISBN>";
    pub const ADMIN_STUDENTS_ADD: &str = "monlivre admin students add --name <NAME> --email <EMAIL>";

    pub const CONFIG: &str = "monlivre config";
}
