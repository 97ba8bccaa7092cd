//! Static HTML forms

pub const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <title>Iniciar sesión</title>
</head>
<body>
  <h1>Iniciar sesión</h1>
  <form method="post" action="/login">
    <label>Usuario <input type="text" name="username" required></label>
    <label>Contraseña <input type="password" name="password" required></label>
    <button type="submit">Entrar</button>
  </form>
</body>
</html>
"#;

pub const CREATE_REPORT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <title>Crear informe</title>
</head>
<body>
  <h1>Crear informe</h1>
  <form method="post" action="/crear">
    <label>Título <input type="text" name="titulo" required></label>
    <label>Descripción <textarea name="descripcion" required></textarea></label>
    <label>Fecha <input type="date" name="fecha" required></label>
    <button type="submit">Guardar</button>
  </form>
  <p><a href="/">Volver</a> · <a href="/logout">Cerrar sesión</a></p>
</body>
</html>
"#;
